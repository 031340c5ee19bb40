//! Foreground gate — the client-side analog of page visibility.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag telling the display-serving loops whether anyone is looking.
///
/// Heartbeats and polls are skipped while backgrounded to avoid inflating
/// request volume; the accrual loop keeps ticking regardless, since time
/// studied is time studied.
#[derive(Debug, Clone)]
pub struct Foreground(Arc<AtomicBool>);

impl Foreground {
    /// Create a gate that starts in the foreground.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Mark the client as foreground/background.
    pub fn set(&self, foreground: bool) {
        self.0.store(foreground, Ordering::Relaxed);
    }

    /// Whether the client is currently in the foreground.
    pub fn is_foreground(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for Foreground {
    fn default() -> Self {
        Self::new()
    }
}
