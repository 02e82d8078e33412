//! Prompt-dialog callback bridge for the LocalTunnel web view.
//!
//! Page script inside the tunnel cannot call the host directly. It calls
//! `prompt(message, "gap-iab://<callbackId>")`, the web view raises a dialog event, and
//! [`DialogInterceptor`] answers it synchronously while forwarding the decoded message to
//! the host's result sink.

pub mod bootstrap;
pub mod ipc;
pub mod state;
pub mod webview_bridge;

pub mod commands {
    pub mod dialog_cmd;
}

pub mod domain {
    pub mod bridge;
    pub mod dialog;
}

pub mod repo {
    pub mod settings_repo;
}

pub mod security {
    pub mod bridge_policy;
    pub mod permission_policy;
}

pub mod services {
    pub mod bridge_router;
    pub mod delivery;
    pub mod dialog_interceptor;
    pub mod request_events;
}

#[cfg(test)]
mod test_support;

pub use domain::bridge::{
    BridgeCommand, PluginResult, PluginResultStatus, RequestStatus, ResultPayload,
};
pub use domain::dialog::{Decision, DialogEvent, DialogOutcome, DialogResolution};
pub use security::permission_policy::{GeolocationPolicy, QuotaPolicy};
pub use services::bridge_router::BridgeRouter;
pub use services::delivery::{RequestDoneNotifier, ResultSink};
pub use services::dialog_interceptor::DialogInterceptor;
pub use services::request_events::TunnelEventForwarder;
pub use state::{TunnelRequestState, TunnelRequestView};
