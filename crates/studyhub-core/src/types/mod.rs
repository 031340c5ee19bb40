//! Domain value types shared across the workspace.
//!
//! Everything here is a wire or view object: the remote service owns the
//! authoritative copy, the client only displays it or requests mutations.

pub mod chat;
pub mod identity;
pub mod notification;
pub mod presence;
pub mod timer;

pub use chat::{ChatMessage, TypingUser};
pub use identity::{Identity, StatusMessage};
pub use notification::Notification;
pub use presence::{PresenceStatus, RosterEntry};
pub use timer::GlobalTimer;
