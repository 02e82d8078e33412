use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

use crate::domain::bridge::{PluginResult, RequestStatus};
use crate::services::delivery::{RequestDoneNotifier, ResultSink};
use crate::state::TunnelRequestView;

#[derive(Default)]
pub struct RecordingSink {
    pub delivered: Mutex<Vec<(PluginResult, String)>>,
}

impl RecordingSink {
    pub fn deliveries(&self) -> Vec<(PluginResult, String)> {
        self.delivered.lock().unwrap().clone()
    }
}

impl ResultSink for RecordingSink {
    fn deliver_result(&self, result: PluginResult, callback_id: &str) {
        self.delivered
            .lock()
            .unwrap()
            .push((result, callback_id.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: Mutex<Vec<Option<RequestStatus>>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<Option<RequestStatus>> {
        self.calls.lock().unwrap().clone()
    }
}

impl RequestDoneNotifier for RecordingNotifier {
    fn notify_request_done(&self, status: Option<RequestStatus>) {
        self.calls.lock().unwrap().push(status);
    }
}

#[derive(Default)]
pub struct FakeTunnelView {
    pub in_flight: bool,
    pub last_url: Option<String>,
}

impl TunnelRequestView for FakeTunnelView {
    fn has_in_flight_request(&self) -> bool {
        self.in_flight
    }

    fn last_completed_request_url(&self) -> Option<String> {
        self.last_url.clone()
    }
}

/// Events captured by `capture_logs`.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CapturedLogs {
    pub fn at(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(recorded, _)| *recorded == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at(Level::WARN)
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.records
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = Registry::default().with(logs.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs)
}
