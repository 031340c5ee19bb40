//! Backend capability traits defined in `studyhub-core` and implemented by
//! other crates.
//!
//! Exactly one concrete remote adapter exists per trait (the HTTP client);
//! tests provide scripted in-memory implementations.

pub mod auth;
pub mod chat;
pub mod notification;
pub mod presence;
pub mod store;

pub use auth::AuthBackend;
pub use chat::ChatBackend;
pub use notification::NotificationBackend;
pub use presence::PresenceBackend;
pub use store::StateStore;
