//! Broadcast notification type.

use serde::{Deserialize, Serialize};

/// One admin broadcast notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Stable identifier assigned by the remote store.
    pub id: String,
    /// Notification text.
    pub message: String,
    /// Unix milliseconds at which the notification was published.
    pub timestamp: i64,
    /// Whether this client has seen the notification. Client-local display
    /// state; never sent to the wire.
    #[serde(default)]
    pub read: bool,
}
