//! State key builders for all StudyHub local state entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Prefix applied to all StudyHub state keys.
const PREFIX: &str = "studyhub";

/// Key for the persisted active identity.
pub fn identity() -> String {
    format!("{PREFIX}:identity")
}

/// Key for the mirrored studying flag.
pub fn studying() -> String {
    format!("{PREFIX}:studying")
}

/// Key for the pending study-minutes outbox of an identity.
pub fn pending_minutes(username: &str) -> String {
    format!("{PREFIX}:outbox:{username}")
}

/// Key for the read notification ids of an identity.
pub fn read_notifications(username: &str) -> String {
    format!("{PREFIX}:notifications:read:{username}")
}
