use crate::domain::bridge::{PluginResult, RequestStatus};

/// Host channel that injects a result back into the page, keyed by callback id.
///
/// Delivery is asynchronous on the page side; implementations must not block the
/// dialog thread.
pub trait ResultSink: Send + Sync {
    fn deliver_result(&self, result: PluginResult, callback_id: &str);
}

/// Tells the tunnel controller that the page acknowledged a finished request.
pub trait RequestDoneNotifier: Send + Sync {
    fn notify_request_done(&self, status: Option<RequestStatus>);
}
