//! Chat polling configuration.

use serde::{Deserialize, Serialize};

/// Chat room polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Chat room identifier to join.
    #[serde(default = "default_room")]
    pub room: String,
    /// Interval between history polls in milliseconds.
    #[serde(default = "default_history_poll")]
    pub history_poll_interval_ms: u64,
    /// Interval between typing-indicator polls in milliseconds.
    #[serde(default = "default_typing_poll")]
    pub typing_poll_interval_ms: u64,
    /// Minimum seconds between outgoing typing events.
    #[serde(default = "default_typing_ttl")]
    pub typing_ttl_seconds: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            room: default_room(),
            history_poll_interval_ms: default_history_poll(),
            typing_poll_interval_ms: default_typing_poll(),
            typing_ttl_seconds: default_typing_ttl(),
        }
    }
}

fn default_room() -> String {
    "study-room-1".to_string()
}

fn default_history_poll() -> u64 {
    2000
}

fn default_typing_poll() -> u64 {
    1500
}

fn default_typing_ttl() -> u64 {
    6
}
