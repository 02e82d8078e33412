use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ipc::{map_read_error, map_write_error, ApiError};
use crate::security::permission_policy::{
    GeolocationPolicy, QuotaPolicy, DEFAULT_QUOTA_CEILING_BYTES,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuotaSettings {
    #[serde(rename = "ceilingBytes", default = "default_ceiling_bytes")]
    pub ceiling_bytes: u64,
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            ceiling_bytes: default_ceiling_bytes(),
        }
    }
}

fn default_ceiling_bytes() -> u64 {
    DEFAULT_QUOTA_CEILING_BYTES
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct BridgeSettings {
    #[serde(default)]
    pub quota: QuotaSettings,
    #[serde(default)]
    pub geolocation: GeolocationPolicy,
}

impl BridgeSettings {
    pub fn quota_policy(&self) -> QuotaPolicy {
        QuotaPolicy::new(self.quota.ceiling_bytes)
    }
}

pub fn load_settings(path: &Path) -> Result<BridgeSettings, ApiError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No bridge settings at {}, using defaults", path.display());
            return Ok(BridgeSettings::default());
        }
        Err(err) => return Err(map_read_error(path, err)),
    };
    serde_json::from_str(&content).map_err(|err| ApiError {
        code: "DecodeFailed".to_string(),
        message: "Failed to decode bridge settings".to_string(),
        details: Some(serde_json::json!({
            "path": path.to_string_lossy().to_string(),
            "error": err.to_string()
        })),
    })
}

pub fn save_settings(path: &Path, settings: &BridgeSettings) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| map_write_error("Failed to create settings directory", parent, err))?;
    }
    let data = serde_json::to_string_pretty(settings).map_err(|err| ApiError {
        code: "WriteFailed".to_string(),
        message: "Failed to encode bridge settings".to_string(),
        details: Some(serde_json::json!({ "error": err.to_string() })),
    })?;
    fs::write(path, data).map_err(|err| map_write_error("Failed to write bridge settings", path, err))?;
    Ok(())
}
