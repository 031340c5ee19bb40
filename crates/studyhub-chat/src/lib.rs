//! # studyhub-chat
//!
//! Chat glue for the shared study room. Message storage and delivery are
//! owned by the remote service; this crate polls history and typing
//! indicators, fans new messages out to the UI, and pushes sends through
//! with an immediate refresh.

pub mod feed;

pub use feed::ChatFeed;
