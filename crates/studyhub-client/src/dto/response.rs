//! Response DTOs.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use studyhub_core::types::{Notification, PresenceStatus, RosterEntry};

/// Outcome envelope used by the auth and rename endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeResponse {
    /// Whether the request was accepted.
    #[serde(default)]
    pub success: bool,
    /// Optional error description on rejection.
    #[serde(default)]
    pub error: Option<String>,
}

/// One row of the `/status` roster payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRow {
    /// Display name.
    pub username: String,
    /// Online/offline status string.
    #[serde(default)]
    pub status: Option<String>,
    /// Accumulated whole minutes.
    #[serde(default)]
    pub total_minutes: Option<u64>,
    /// Optional status message.
    #[serde(default)]
    pub status_text: Option<String>,
    /// Last heartbeat in unix milliseconds.
    #[serde(default)]
    pub last_seen: Option<i64>,
}

impl RosterRow {
    /// Convert a wire row into the domain roster entry.
    pub fn into_entry(self) -> RosterEntry {
        RosterEntry {
            username: self.username,
            status: self
                .status
                .as_deref()
                .map(PresenceStatus::from_str_or_default)
                .unwrap_or(PresenceStatus::Offline),
            total_minutes: self.total_minutes.unwrap_or(0),
            status_text: self.status_text,
            last_seen: self
                .last_seen
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        }
    }
}

/// One row of the notification feed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRow {
    /// Stable identifier.
    pub id: String,
    /// Notification text.
    pub message: String,
    /// Publish time in unix milliseconds.
    pub timestamp: i64,
}

impl NotificationRow {
    /// Convert a wire row into the domain notification (unread).
    pub fn into_notification(self) -> Notification {
        Notification {
            id: self.id,
            message: self.message,
            timestamp: self.timestamp,
            read: false,
        }
    }
}

/// `/timer/status` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerStatusResponse {
    /// Timer start in unix milliseconds.
    #[serde(rename = "startTime", default)]
    pub start_time: Option<i64>,
}
