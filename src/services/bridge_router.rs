use std::sync::Arc;

use tracing::{info, span, warn, Level};
use uuid::Uuid;

use crate::domain::bridge::{
    BridgeCommand, PluginResult, PromptOutcome, RequestStatus, ResultPayload,
};
use crate::domain::dialog::Decision;
use crate::security::bridge_policy;
use crate::services::delivery::{RequestDoneNotifier, ResultSink};

// Routes `gap-iab://` prompts to the result sink or the request-done notifier
pub struct BridgeRouter {
    sink: Arc<dyn ResultSink>,
    notifier: Arc<dyn RequestDoneNotifier>,
}

impl BridgeRouter {
    pub fn new(sink: Arc<dyn ResultSink>, notifier: Arc<dyn RequestDoneNotifier>) -> Self {
        Self { sink, notifier }
    }

    /// Decode a prompt's default value and act on it.
    ///
    /// Every gap-prefixed prompt is answered: recognised commands confirm with an empty
    /// string, anything else cancels. Prompts without the prefix are left to the browser.
    pub fn handle_prompt(
        &self,
        page_url: &str,
        message: Option<&str>,
        default_value: Option<&str>,
    ) -> PromptOutcome {
        let command = bridge_policy::parse_bridge_command(page_url, default_value);
        if command == BridgeCommand::NotABridgeCall {
            return PromptOutcome {
                command,
                decision: Decision::NotIntercepted,
                error: None,
            };
        }

        let op_id = Uuid::new_v4().to_string();
        let span = span!(Level::INFO, "bridge.handle_prompt", op_id = %op_id, page_url = page_url);
        let _enter = span.enter();

        let mut error = command.rejection();
        let decision = match &command {
            BridgeCommand::ResultCallback { callback_id } => {
                let payload = ResultPayload::from_message(message);
                error = payload.decode_error();
                if let ResultPayload::DecodeFailure(detail) = &payload {
                    info!(target: "local_tunnel", "forwarding decode failure: callback_id={}, error={}", callback_id, detail);
                } else {
                    info!(target: "local_tunnel", "delivering result: callback_id={}", callback_id);
                }
                self.sink.deliver_result(PluginResult::from(payload), callback_id);
                Decision::confirm_with("")
            }
            BridgeCommand::RequestDoneSignal => {
                let payload = ResultPayload::from_message(message);
                let status = RequestStatus::from_payload(&payload);
                if status.is_none() {
                    warn!(target: "local_tunnel", "request done without [status, statusText]: message={:?}", message);
                }
                self.notifier.notify_request_done(status);
                Decision::confirm_with("")
            }
            BridgeCommand::UnsupportedGapCall { url, default_value } => {
                warn!(target: "local_tunnel", "LocalTunnel does not support gap calls: {} {}", url, default_value);
                Decision::cancel()
            }
            BridgeCommand::NotABridgeCall => Decision::NotIntercepted,
        };

        PromptOutcome {
            command,
            decision,
            error,
        }
    }
}
