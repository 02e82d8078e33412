use serde::{Deserialize, Serialize};

use crate::domain::dialog::{GeolocationDecision, GeolocationPrompt, QuotaExceeded, QuotaGrant};

pub const DEFAULT_QUOTA_CEILING_BYTES: u64 = 100 * 1024 * 1024;

/// Storage quota policy: every database is granted the same fixed ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub ceiling_bytes: u64,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            ceiling_bytes: DEFAULT_QUOTA_CEILING_BYTES,
        }
    }
}

impl QuotaPolicy {
    pub fn new(ceiling_bytes: u64) -> Self {
        Self { ceiling_bytes }
    }

    // Inputs only feed the log line; the grant never depends on them.
    pub fn granted_quota(&self, estimated: u64, current: u64, total_used: u64) -> u64 {
        tracing::debug!(
            target: "local_tunnel",
            "quota exceeded: estimated_size={}, current_quota={}, total_used_quota={}",
            estimated,
            current,
            total_used
        );
        self.ceiling_bytes
    }

    pub fn grant(&self, event: &QuotaExceeded) -> QuotaGrant {
        QuotaGrant {
            database_id: event.database_id.clone(),
            quota_bytes: self.granted_quota(
                event.estimated_size_bytes,
                event.current_quota_bytes,
                event.total_used_quota_bytes,
            ),
        }
    }
}

/// What the host answers when embedded content asks for geolocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeolocationPolicy {
    #[default]
    AlwaysAllow,
    AlwaysDeny,
    Prompt,
}

impl GeolocationPolicy {
    pub fn decide(self, event: &GeolocationPrompt) -> GeolocationDecision {
        // Grants are never persisted past the session.
        match self {
            GeolocationPolicy::AlwaysAllow => GeolocationDecision::Grant {
                origin: event.origin_url.clone(),
                allow: true,
                remember: false,
            },
            GeolocationPolicy::AlwaysDeny => GeolocationDecision::Grant {
                origin: event.origin_url.clone(),
                allow: false,
                remember: false,
            },
            GeolocationPolicy::Prompt => GeolocationDecision::Defer,
        }
    }
}
