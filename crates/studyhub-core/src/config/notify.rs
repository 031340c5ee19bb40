//! Broadcast notification configuration.

use serde::{Deserialize, Serialize};

/// Broadcast notification polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Interval between notification polls in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Maximum notifications fetched per poll.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            fetch_limit: default_fetch_limit(),
        }
    }
}

fn default_poll_interval() -> u64 {
    15
}

fn default_fetch_limit() -> u64 {
    50
}
