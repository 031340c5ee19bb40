//! # studyhub-client
//!
//! HTTP adapter for the remote worker API. Implements every backend trait
//! from `studyhub-core` over plain JSON request/response calls:
//!
//! - Auth: login/signup
//! - Presence: heartbeat, study flush, roster, status, rename, leave
//! - Chat: history, send, typing indicators
//! - Notifications: broadcast feed
//! - Community timer: status and reset
//!
//! This is the only crate that talks to the network.

pub mod auth;
pub mod chat;
pub mod dto;
pub mod http;
pub mod notification;
pub mod presence;
pub mod timer;

pub use http::ApiClient;
