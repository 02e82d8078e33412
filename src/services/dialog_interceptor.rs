use std::sync::Arc;

use tracing::debug;

use crate::domain::bridge::PromptOutcome;
use crate::domain::dialog::{
    Decision, DialogEvent, DialogOutcome, GeolocationDecision, GeolocationPrompt, JsAlert,
    JsPrompt, QuotaExceeded, QuotaGrant,
};
use crate::security::permission_policy::{GeolocationPolicy, QuotaPolicy};
use crate::services::bridge_router::BridgeRouter;
use crate::state::TunnelRequestView;

/// Decides, per dialog event raised by the tunnel web view, whether the host answers it.
///
/// Runs on the web view's event thread. Every call returns before the page's blocked
/// script resumes, so nothing here waits on I/O.
pub struct DialogInterceptor {
    router: BridgeRouter,
    tunnel: Arc<dyn TunnelRequestView>,
    quota: QuotaPolicy,
    geolocation: GeolocationPolicy,
}

impl DialogInterceptor {
    pub fn new(
        router: BridgeRouter,
        tunnel: Arc<dyn TunnelRequestView>,
        quota: QuotaPolicy,
        geolocation: GeolocationPolicy,
    ) -> Self {
        Self {
            router,
            tunnel,
            quota,
            geolocation,
        }
    }

    pub fn handle(&self, event: &DialogEvent) -> DialogOutcome {
        match event {
            DialogEvent::QuotaExceeded(quota) => DialogOutcome::Quota(self.on_quota_exceeded(quota)),
            DialogEvent::GeolocationPrompt(prompt) => {
                DialogOutcome::Geolocation(self.on_geolocation_prompt(prompt))
            }
            DialogEvent::JsAlert(alert) => DialogOutcome::Alert {
                decision: self.on_js_alert(alert),
            },
            DialogEvent::JsPrompt(prompt) => DialogOutcome::Prompt(self.route_prompt(prompt)),
        }
    }

    pub fn on_quota_exceeded(&self, event: &QuotaExceeded) -> QuotaGrant {
        self.quota.grant(event)
    }

    pub fn on_geolocation_prompt(&self, event: &GeolocationPrompt) -> GeolocationDecision {
        self.geolocation.decide(event)
    }

    pub fn on_js_prompt(&self, event: &JsPrompt) -> Decision {
        self.route_prompt(event).decision
    }

    // Suppression is best effort: the controller may flip its state between reads.
    pub fn on_js_alert(&self, event: &JsAlert) -> Decision {
        debug!(target: "local_tunnel", "alert received: page_url={}", event.page_url);
        let in_flight = self.tunnel.has_in_flight_request();
        let after_last_request =
            self.tunnel.last_completed_request_url().as_deref() == Some(event.page_url.as_str());
        if in_flight || after_last_request {
            debug!(target: "local_tunnel", "suppressing alert: in_flight={}, page_url={}", in_flight, event.page_url);
            return Decision::confirm();
        }
        Decision::NotIntercepted
    }

    fn route_prompt(&self, event: &JsPrompt) -> PromptOutcome {
        self.router.handle_prompt(
            &event.page_url,
            event.message.as_deref(),
            event.default_value.as_deref(),
        )
    }
}
