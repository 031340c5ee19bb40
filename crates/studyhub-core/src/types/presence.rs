//! Presence status and online roster records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Online/offline status reported by the remote service for a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceStatus {
    /// User has a recent heartbeat.
    Online,
    /// User's heartbeat has timed out.
    Offline,
}

impl PresenceStatus {
    /// Parses from a string with a default fallback.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "online" => Self::Online,
            "offline" => Self::Offline,
            _ => Self::Offline,
        }
    }

    /// Converts to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

/// One row of the remote roster snapshot.
///
/// Created and destroyed entirely by the remote service; the client never
/// mutates it directly, only requests mutations (status text, rename) that
/// are reflected back through later polls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Display name.
    pub username: String,
    /// Online/offline status.
    pub status: PresenceStatus,
    /// Accumulated study total in whole minutes.
    pub total_minutes: u64,
    /// Optional short status message (24h visibility, enforced remotely).
    pub status_text: Option<String>,
    /// Last heartbeat seen by the remote service.
    pub last_seen: Option<DateTime<Utc>>,
}

impl RosterEntry {
    /// Study total in seconds, for display.
    ///
    /// Whole minutes times sixty: an approximation by design, never a live
    /// sub-minute count.
    pub fn total_seconds(&self) -> u64 {
        self.total_minutes * 60
    }
}
