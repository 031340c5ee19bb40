//! Chat message and typing indicator types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat message as returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender display name.
    pub username: String,
    /// Message text.
    pub message: String,
    /// Server-side receive time, when the endpoint provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A user currently typing in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingUser {
    /// Display name.
    pub username: String,
}
