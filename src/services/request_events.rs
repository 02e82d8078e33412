use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::bridge::{PluginResult, RequestOutcome, RequestStatus};
use crate::services::delivery::{RequestDoneNotifier, ResultSink};
use crate::state::TunnelRequestState;

const HTTP_REQUEST_DONE_EVENT: &str = "requestdone";
const LOAD_ERROR_EVENT: &str = "loaderror";

/// Turns a page-reported request completion into a tunnel event on the opener's callback.
pub struct TunnelEventForwarder {
    state: Arc<TunnelRequestState>,
    sink: Arc<dyn ResultSink>,
    open_callback_id: String,
}

impl TunnelEventForwarder {
    pub fn new(
        state: Arc<TunnelRequestState>,
        sink: Arc<dyn ResultSink>,
        open_callback_id: impl Into<String>,
    ) -> Self {
        Self {
            state,
            sink,
            open_callback_id: open_callback_id.into(),
        }
    }
}

impl RequestDoneNotifier for TunnelEventForwarder {
    fn notify_request_done(&self, status: Option<RequestStatus>) {
        let Some(status) = status else {
            return;
        };
        let url = self.state.current_request_url();
        let event = match status.outcome() {
            RequestOutcome::Done => json!({ "type": HTTP_REQUEST_DONE_EVENT, "url": url }),
            RequestOutcome::LoadError => json!({
                "type": LOAD_ERROR_EVENT,
                "url": url,
                "code": status.code,
                "message": status.status_text,
            }),
        };
        info!(target: "local_tunnel", "request finished: code={}, callback_id={}", status.code, self.open_callback_id);
        self.sink
            .deliver_result(PluginResult::ok(event).keep_callback(), &self.open_callback_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingSink;

    fn forwarder() -> (TunnelEventForwarder, Arc<TunnelRequestState>, Arc<RecordingSink>) {
        let state = Arc::new(TunnelRequestState::new());
        let sink = Arc::new(RecordingSink::default());
        (
            TunnelEventForwarder::new(state.clone(), sink.clone(), "LocalTunnel1"),
            state,
            sink,
        )
    }

    #[test]
    fn success_status_emits_requestdone_event() {
        let (forwarder, state, sink) = forwarder();
        state.begin_request("https://api.tunnel.local/login");

        forwarder.notify_request_done(Some(RequestStatus {
            code: 200,
            status_text: "OK".to_string(),
        }));

        let deliveries = sink.deliveries();
        assert_eq!(deliveries.len(), 1);
        let (result, callback_id) = &deliveries[0];
        assert_eq!(callback_id, "LocalTunnel1");
        assert!(result.keep_callback);
        assert_eq!(
            result.value,
            json!({ "type": "requestdone", "url": "https://api.tunnel.local/login" })
        );
    }

    #[test]
    fn failure_status_emits_loaderror_event() {
        let (forwarder, state, sink) = forwarder();
        state.begin_request("https://api.tunnel.local/login");

        forwarder.notify_request_done(Some(RequestStatus {
            code: 500,
            status_text: "Load error".to_string(),
        }));

        assert_eq!(
            sink.deliveries()[0].0.value,
            json!({
                "type": "loaderror",
                "url": "https://api.tunnel.local/login",
                "code": 500,
                "message": "Load error"
            })
        );
    }

    #[test]
    fn missing_status_emits_nothing() {
        let (forwarder, _, sink) = forwarder();
        forwarder.notify_request_done(None);
        assert!(sink.deliveries().is_empty());
    }
}
