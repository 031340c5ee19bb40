//! Remote worker API configuration.

use serde::{Deserialize, Serialize};

/// Remote worker API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the worker API, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds for ordinary calls.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Timeout budget for the best-effort departure notice sent during
    /// teardown. Kept short so shutdown never hangs on a dead network.
    #[serde(default = "default_leave_timeout")]
    pub leave_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    10
}

fn default_leave_timeout() -> u64 {
    5
}
