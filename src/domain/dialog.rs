use serde::{Deserialize, Serialize};

use crate::domain::bridge::PromptOutcome;

// Quota-exceeded notification raised for a web storage database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaExceeded {
    pub origin_url: String,
    pub database_id: String,
    pub current_quota_bytes: u64,
    pub estimated_size_bytes: u64,
    pub total_used_quota_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationPrompt {
    pub origin_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsAlert {
    pub page_url: String,
    #[serde(default)]
    pub message: String,
}

// `message` and `default_value` are nullable on the browser side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsPrompt {
    pub page_url: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// A script-blocking request raised by the web view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DialogEvent {
    QuotaExceeded(QuotaExceeded),
    GeolocationPrompt(GeolocationPrompt),
    JsAlert(JsAlert),
    JsPrompt(JsPrompt),
}

/// How an intercepted alert or prompt is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum DialogResolution {
    Confirm,
    ConfirmWith { value: String },
    Cancel,
}

/// Whether the host answers a dialog itself or lets the browser show its default UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum Decision {
    NotIntercepted,
    Intercepted { resolution: DialogResolution },
}

impl Decision {
    pub fn intercepted(resolution: DialogResolution) -> Self {
        Decision::Intercepted { resolution }
    }

    pub fn confirm() -> Self {
        Decision::intercepted(DialogResolution::Confirm)
    }

    pub fn confirm_with(value: impl Into<String>) -> Self {
        Decision::intercepted(DialogResolution::ConfirmWith {
            value: value.into(),
        })
    }

    pub fn cancel() -> Self {
        Decision::intercepted(DialogResolution::Cancel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaGrant {
    pub database_id: String,
    pub quota_bytes: u64,
}

/// Answer to a geolocation permission prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum GeolocationDecision {
    // `remember` maps to the browser's "retain" flag
    Grant {
        origin: String,
        allow: bool,
        remember: bool,
    },
    Defer,
}

/// Result of routing one `DialogEvent` through the interceptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DialogOutcome {
    Quota(QuotaGrant),
    Geolocation(GeolocationDecision),
    Alert { decision: Decision },
    Prompt(PromptOutcome),
}
