//! # studyhub-notify
//!
//! Broadcast notification feed. The remote store owns the notifications;
//! this crate polls them and tracks which ones the local user has read,
//! persisted per identity so markers survive restarts.

pub mod feed;

pub use feed::NotificationFeed;
