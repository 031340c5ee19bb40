//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Username.
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    /// Password.
    #[validate(length(min = 8))]
    pub password: String,
}

/// Heartbeat request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    /// Username.
    pub username: String,
}

/// Study time flush request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyUpdateRequest {
    /// Username.
    pub username: String,
    /// Accrued whole minutes to add. Never zero.
    pub minutes: u64,
}

/// Departure notice body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Username.
    pub username: String,
}

/// Status message update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// Username.
    pub username: String,
    /// Status text (24h visibility, enforced remotely).
    pub status_text: String,
}

/// Rename request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    /// Current username.
    pub old_username: String,
    /// Requested new username.
    pub new_username: String,
}

/// Chat send request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatSendRequest {
    /// Room identifier.
    pub room_id: String,
    /// Sender username.
    pub username: String,
    /// Message text.
    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: String,
}

/// Typing indicator body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingRequest {
    /// Room identifier.
    pub room_id: String,
    /// Username.
    pub username: String,
}
