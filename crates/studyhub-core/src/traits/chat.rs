//! Chat backend trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{ChatMessage, Identity, TypingUser};

/// Remote chat operations. Message storage and delivery are owned by the
/// remote service; the client polls and sends opaque text.
#[async_trait]
pub trait ChatBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the full message history for a room.
    async fn history(&self, room: &str) -> AppResult<Vec<ChatMessage>>;

    /// Send one message to a room.
    async fn send(&self, room: &str, identity: &Identity, message: &str) -> AppResult<()>;

    /// Record a short-lived typing indicator for the identity.
    async fn notify_typing(&self, room: &str, identity: &Identity) -> AppResult<()>;

    /// Fetch users currently typing in a room.
    async fn typing_users(&self, room: &str) -> AppResult<Vec<TypingUser>>;
}
