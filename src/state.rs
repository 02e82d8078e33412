use std::sync::{Mutex, MutexGuard};

/// Read-only view of the tunnel controller's request bookkeeping.
pub trait TunnelRequestView: Send + Sync {
    fn has_in_flight_request(&self) -> bool;
    fn last_completed_request_url(&self) -> Option<String>;
}

// Owned and mutated by the tunnel controller; the dialog path only reads it.
#[derive(Default)]
pub struct TunnelRequestState {
    request_url: Mutex<Option<String>>,
    last_request_url: Mutex<Option<String>>,
}

impl TunnelRequestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_request(&self, url: &str) {
        *lock(&self.request_url) = Some(url.to_string());
        *lock(&self.last_request_url) = Some(url.to_string());
    }

    pub fn finish_request(&self) {
        *lock(&self.request_url) = None;
    }

    pub fn reset(&self) {
        *lock(&self.request_url) = None;
        *lock(&self.last_request_url) = None;
    }

    pub fn current_request_url(&self) -> Option<String> {
        lock(&self.request_url).clone()
    }
}

impl TunnelRequestView for TunnelRequestState {
    fn has_in_flight_request(&self) -> bool {
        lock(&self.request_url).is_some()
    }

    fn last_completed_request_url(&self) -> Option<String> {
        lock(&self.last_request_url).clone()
    }
}

fn lock(slot: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
