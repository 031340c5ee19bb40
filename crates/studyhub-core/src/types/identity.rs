//! Identity and status message value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum display name length.
const NAME_MIN: usize = 3;
/// Maximum display name length.
const NAME_MAX: usize = 32;
/// Maximum status message length.
const STATUS_MAX: usize = 120;

/// The chosen display name representing a client session.
///
/// Not a secured account: authentication is delegated to the remote API,
/// this type only guarantees the name is well-formed. At most one identity
/// is active per client at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Validate and wrap a display name.
    pub fn new(name: impl Into<String>) -> Result<Self, AppError> {
        let name = name.into();
        if name.trim() != name {
            return Err(AppError::validation(
                "Username must not have leading or trailing whitespace",
            ));
        }
        if name.len() < NAME_MIN || name.len() > NAME_MAX {
            return Err(AppError::validation(format!(
                "Username must be {NAME_MIN}-{NAME_MAX} characters, got {}",
                name.len()
            )));
        }
        Ok(Self(name))
    }

    /// The display name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A short user-chosen status line with a 24-hour visibility intent.
///
/// The 24h expiry is enforced by the remote service, not locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusMessage(String);

impl StatusMessage {
    /// Validate and wrap a status message.
    pub fn new(text: impl Into<String>) -> Result<Self, AppError> {
        let text = text.into();
        if text.len() > STATUS_MAX {
            return Err(AppError::validation(format!(
                "Status message must be at most {STATUS_MAX} characters, got {}",
                text.len()
            )));
        }
        Ok(Self(text))
    }

    /// The message as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
