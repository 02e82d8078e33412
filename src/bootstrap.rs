use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::ipc::ApiError;
use crate::repo::settings_repo::{self, BridgeSettings};
use crate::services::bridge_router::BridgeRouter;
use crate::services::delivery::{RequestDoneNotifier, ResultSink};
use crate::services::dialog_interceptor::DialogInterceptor;
use crate::state::TunnelRequestView;

/// Install the global `tracing` subscriber and route `log` records into it.
pub fn init_logging() -> anyhow::Result<()> {
    tracing_log::LogTracer::init().context("log bridge already installed")?;
    let subscriber = tracing_subscriber::fmt().with_target(true).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("global tracing subscriber already installed")?;
    Ok(())
}

pub fn build_interceptor(
    settings: &BridgeSettings,
    tunnel: Arc<dyn TunnelRequestView>,
    sink: Arc<dyn ResultSink>,
    notifier: Arc<dyn RequestDoneNotifier>,
) -> DialogInterceptor {
    DialogInterceptor::new(
        BridgeRouter::new(sink, notifier),
        tunnel,
        settings.quota_policy(),
        settings.geolocation,
    )
}

pub fn init_interceptor(
    settings_path: &Path,
    tunnel: Arc<dyn TunnelRequestView>,
    sink: Arc<dyn ResultSink>,
    notifier: Arc<dyn RequestDoneNotifier>,
) -> Result<DialogInterceptor, ApiError> {
    let settings = settings_repo::load_settings(settings_path)?;
    tracing::info!(
        target: "local_tunnel",
        "bridge ready: quota_ceiling_bytes={}, geolocation={:?}",
        settings.quota.ceiling_bytes,
        settings.geolocation
    );
    Ok(build_interceptor(&settings, tunnel, sink, notifier))
}
