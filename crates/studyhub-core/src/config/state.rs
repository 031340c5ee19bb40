//! Local durable state configuration.

use serde::{Deserialize, Serialize};

/// Local durable state configuration.
///
/// Identity, the pending-minutes outbox, and notification read markers are
/// persisted here so they survive a client restart. Nothing in this store
/// is authoritative; the remote service owns all shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// State provider: `"file"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Path of the state file used by the file provider.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            path: default_path(),
        }
    }
}

fn default_provider() -> String {
    "file".to_string()
}

fn default_path() -> String {
    "data/state/studyhub.json".to_string()
}
