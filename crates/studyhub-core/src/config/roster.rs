//! Online roster polling configuration.

use serde::{Deserialize, Serialize};

/// Online roster polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Interval between roster polls in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
        }
    }
}

fn default_poll_interval() -> u64 {
    5
}
