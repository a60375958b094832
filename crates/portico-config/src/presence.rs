//! Presence toggle configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default door-device round-trip latency in milliseconds.
const fn default_toggle_latency_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PresenceConfig {
    /// Simulated I/O latency of a presence toggle, in milliseconds.
    #[serde(default = "default_toggle_latency_ms")]
    pub toggle_latency_ms: u64,
}

impl PresenceConfig {
    /// The toggle latency as a [`Duration`], ready for the controller.
    #[must_use]
    pub const fn toggle_latency(&self) -> Duration {
        Duration::from_millis(self.toggle_latency_ms)
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            toggle_latency_ms: default_toggle_latency_ms(),
        }
    }
}
