//! Presence heartbeat configuration.

use serde::{Deserialize, Serialize};

/// Presence heartbeat configuration.
///
/// The heartbeat tells the remote service the client is alive, independent
/// of study activity. The remote side's own timeout policy decides when a
/// silent user is considered offline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Interval between heartbeats in seconds.
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_seconds: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_seconds: default_heartbeat_interval(),
        }
    }
}

fn default_heartbeat_interval() -> u64 {
    60
}
