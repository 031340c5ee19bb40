//! # studyhub-session
//!
//! The session and accrual engine for StudyHub. Provides:
//!
//! - Session lifecycle: one active identity per client, loops (re)started
//!   on identity change and torn down on logout
//! - Presence heartbeat loop, independent of study activity
//! - Study accrual loop: local minute counter, batched flushes, durable
//!   outbox retry
//! - Online roster poller with a self high-water merge so the user's own
//!   progress never appears to go backwards
//!
//! Everything here is client state; the remote service stays authoritative.

pub mod accrual;
pub mod engine;
pub mod foreground;
pub mod heartbeat;
pub mod roster;

pub use engine::{EngineConfig, SessionEngine};
pub use foreground::Foreground;
pub use roster::state::RosterState;
