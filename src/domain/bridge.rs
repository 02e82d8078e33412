use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::dialog::Decision;
use crate::ipc::ApiError;

/// Generic reserved prefix. Any prompt default value starting with it is a bridge attempt.
pub const BRIDGE_SCHEME_PREFIX: &str = "gap";
/// The only supported bridge form: `gap-iab://<callbackId>`.
pub const BRIDGE_URL_PREFIX: &str = "gap-iab://";
/// Callback ids owned by the tunnel plugin.
pub const TUNNEL_CALLBACK_PREFIX: &str = "LocalTunnel";
pub const REQUEST_DONE_TOKEN: &str = "requestdone";

/// Command decoded from a prompt's default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BridgeCommand {
    #[serde(rename_all = "camelCase")]
    ResultCallback { callback_id: String },
    RequestDoneSignal,
    #[serde(rename_all = "camelCase")]
    UnsupportedGapCall { url: String, default_value: String },
    NotABridgeCall,
}

impl BridgeCommand {
    /// The in-band error reported for a rejected bridge attempt.
    pub fn rejection(&self) -> Option<ApiError> {
        match self {
            BridgeCommand::UnsupportedGapCall { url, default_value } => Some(ApiError {
                code: "MalformedBridgeUrl".to_string(),
                message: "Bridge call is not a supported gap-iab callback".to_string(),
                details: Some(serde_json::json!({ "url": url, "defaultValue": default_value })),
            }),
            _ => None,
        }
    }
}

/// Value forwarded to a tunnel callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPayload {
    Ok(Vec<Value>),
    DecodeFailure(String),
}

impl ResultPayload {
    /// Empty or missing messages become an empty sequence; anything else must be a JSON array.
    pub fn from_message(message: Option<&str>) -> Self {
        match message {
            None | Some("") => ResultPayload::Ok(Vec::new()),
            Some(text) => match serde_json::from_str::<Vec<Value>>(text) {
                Ok(values) => ResultPayload::Ok(values),
                Err(err) => ResultPayload::DecodeFailure(err.to_string()),
            },
        }
    }

    pub fn decode_error(&self) -> Option<ApiError> {
        match self {
            ResultPayload::Ok(_) => None,
            ResultPayload::DecodeFailure(detail) => Some(ApiError {
                code: "MessageDecodeFailure".to_string(),
                message: "Prompt message is not a JSON array".to_string(),
                details: Some(serde_json::json!({ "error": detail })),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginResultStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "JSON_ERROR")]
    JsonError,
}

/// What the result-delivery sink receives for a callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginResult {
    pub status: PluginResultStatus,
    pub value: Value,
    #[serde(default)]
    pub keep_callback: bool,
}

impl PluginResult {
    pub fn ok(value: Value) -> Self {
        PluginResult {
            status: PluginResultStatus::Ok,
            value,
            keep_callback: false,
        }
    }

    pub fn keep_callback(mut self) -> Self {
        self.keep_callback = true;
        self
    }
}

impl From<ResultPayload> for PluginResult {
    fn from(payload: ResultPayload) -> Self {
        match payload {
            ResultPayload::Ok(values) => PluginResult::ok(Value::Array(values)),
            ResultPayload::DecodeFailure(detail) => PluginResult {
                status: PluginResultStatus::JsonError,
                value: Value::String(detail),
                keep_callback: false,
            },
        }
    }
}

/// `[status, statusText]` reported by the page when a tunneled request finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStatus {
    pub code: i64,
    pub status_text: String,
}

impl RequestStatus {
    pub fn from_payload(payload: &ResultPayload) -> Option<Self> {
        let values = match payload {
            ResultPayload::Ok(values) => values,
            ResultPayload::DecodeFailure(_) => return None,
        };
        let code = status_code(values.first()?)?;
        let status_text = match values.get(1)? {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            _ => return None,
        };
        Some(RequestStatus { code, status_text })
    }

    pub fn outcome(&self) -> RequestOutcome {
        RequestOutcome::from_status(self.code)
    }
}

// Integers, whole floats and numeric strings are all accepted as a status code.
fn status_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|code| code.fract() == 0.0 && code.abs() <= i64::MAX as f64)
                .map(|code| code as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Done,
    LoadError,
}

impl RequestOutcome {
    pub fn from_status(code: i64) -> Self {
        if (200..400).contains(&code) {
            RequestOutcome::Done
        } else {
            RequestOutcome::LoadError
        }
    }
}

/// What the router decided for one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOutcome {
    pub command: BridgeCommand,
    pub decision: Decision,
    /// `MalformedBridgeUrl` for rejected calls, `MessageDecodeFailure` for undecodable messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}
