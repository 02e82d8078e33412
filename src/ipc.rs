use serde::Serialize;
use std::path::Path;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Ok { ok: bool, data: T },
    Err { ok: bool, error: ApiError },
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse::Ok { ok: true, data }
    }

    pub fn err(code: &str, message: &str, details: Option<serde_json::Value>) -> Self {
        ApiResponse::Err {
            ok: false,
            error: ApiError {
                code: code.to_string(),
                message: message.to_string(),
                details,
            },
        }
    }
}

pub fn map_read_error(path: &Path, err: std::io::Error) -> ApiError {
    let code = match err.kind() {
        std::io::ErrorKind::NotFound => "NotFound",
        std::io::ErrorKind::PermissionDenied => "PermissionDenied",
        _ => "ReadFailed",
    };
    ApiError {
        code: code.to_string(),
        message: "Failed to read settings file".to_string(),
        details: Some(serde_json::json!({
            "path": path.to_string_lossy().to_string(),
            "error": err.to_string()
        })),
    }
}

pub fn map_write_error(message: &str, path: &Path, err: std::io::Error) -> ApiError {
    let code = match err.kind() {
        std::io::ErrorKind::PermissionDenied => "PermissionDenied",
        std::io::ErrorKind::NotFound => "NotFound",
        _ => "WriteFailed",
    };
    ApiError {
        code: code.to_string(),
        message: message.to_string(),
        details: Some(serde_json::json!({
            "path": path.to_string_lossy().to_string(),
            "error": err.to_string()
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn responses_serialize_with_ok_flag() {
        let ok: ApiResponse<u32> = ApiResponse::ok(7);
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({ "ok": true, "data": 7 }));

        let err: ApiResponse<u32> = ApiResponse::err("InvalidEvent", "bad", None);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "ok": false, "error": { "code": "InvalidEvent", "message": "bad" } })
        );
    }

    #[test]
    fn io_errors_map_to_stable_codes() {
        let path = Path::new("/tmp/settings.json");
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(map_read_error(path, denied).code, "PermissionDenied");

        let other = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert_eq!(map_write_error("Failed", path, other).code, "WriteFailed");
    }
}
