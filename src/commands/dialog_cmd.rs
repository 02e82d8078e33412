use crate::domain::dialog::{DialogEvent, DialogOutcome};
use crate::ipc::ApiResponse;
use crate::services::dialog_interceptor::DialogInterceptor;

// Resolve one dialog event raised by the web view
pub fn dialog_handle_event(
    interceptor: &DialogInterceptor,
    input: DialogEvent,
) -> ApiResponse<DialogOutcome> {
    ApiResponse::ok(interceptor.handle(&input))
}

// JSON in, JSON out for hosts that cross a language boundary
pub fn dialog_handle_event_json(interceptor: &DialogInterceptor, raw: &str) -> String {
    let response = match serde_json::from_str::<DialogEvent>(raw) {
        Ok(event) => dialog_handle_event(interceptor, event),
        Err(err) => ApiResponse::err(
            "InvalidEvent",
            "Failed to decode dialog event",
            Some(serde_json::json!({ "error": err.to_string() })),
        ),
    };
    serde_json::to_string(&response).unwrap_or_else(|err| {
        serde_json::json!({
            "ok": false,
            "error": { "code": "Unknown", "message": err.to_string() }
        })
        .to_string()
    })
}
