//! Whitelist for prompt-bridge calls.
//!
//! A prompt default value may only execute something on the host when it is exactly
//! `gap-iab://LocalTunnel...` or `gap-iab://requestdone...`. Matching is byte-exact and
//! anchored at the start; there is no case folding and no substring search.

use crate::domain::bridge::{
    BridgeCommand, BRIDGE_SCHEME_PREFIX, BRIDGE_URL_PREFIX, REQUEST_DONE_TOKEN,
    TUNNEL_CALLBACK_PREFIX,
};

pub fn parse_bridge_command(page_url: &str, default_value: Option<&str>) -> BridgeCommand {
    let Some(default_value) = default_value else {
        return BridgeCommand::NotABridgeCall;
    };
    if !default_value.starts_with(BRIDGE_SCHEME_PREFIX) {
        return BridgeCommand::NotABridgeCall;
    }

    let Some(candidate) = default_value.strip_prefix(BRIDGE_URL_PREFIX) else {
        return unsupported(page_url, default_value);
    };

    if is_tunnel_callback_id(candidate) {
        BridgeCommand::ResultCallback {
            callback_id: candidate.to_string(),
        }
    } else if candidate.starts_with(REQUEST_DONE_TOKEN) {
        BridgeCommand::RequestDoneSignal
    } else {
        unsupported(page_url, default_value)
    }
}

pub fn is_tunnel_callback_id(callback_id: &str) -> bool {
    callback_id.starts_with(TUNNEL_CALLBACK_PREFIX)
}

fn unsupported(page_url: &str, default_value: &str) -> BridgeCommand {
    BridgeCommand::UnsupportedGapCall {
        url: page_url.to_string(),
        default_value: default_value.to_string(),
    }
}
