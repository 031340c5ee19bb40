//! Study time accrual configuration.

use serde::{Deserialize, Serialize};

/// Study time accrual configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualConfig {
    /// Length of one accrual tick in seconds. Every full tick spent in a
    /// study session adds one minute unit to the unsaved counter.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_seconds: u64,
    /// Number of ticks batched locally before one flush request is sent.
    /// A value of `1` flushes every tick.
    #[serde(default = "default_flush_batch")]
    pub flush_batch_ticks: u64,
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self {
            tick_interval_seconds: default_tick_interval(),
            flush_batch_ticks: default_flush_batch(),
        }
    }
}

fn default_tick_interval() -> u64 {
    60
}

fn default_flush_batch() -> u64 {
    5
}
