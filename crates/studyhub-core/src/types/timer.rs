//! Community timer type.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The shared community timer.
///
/// The remote service stores only the start instant; elapsed time is derived
/// locally at display time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalTimer {
    /// Start instant in unix milliseconds.
    pub start_time_ms: i64,
}

impl GlobalTimer {
    /// Elapsed whole seconds since the timer started, clamped at zero.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        let start = Utc
            .timestamp_millis_opt(self.start_time_ms)
            .single()
            .unwrap_or(now);
        (now - start).num_seconds().max(0) as u64
    }
}
