//! Study time accrual: tick counter, batched flushes, durable outbox.

pub mod engine;
pub mod outbox;

pub use engine::run_accrual;
pub use outbox::{Outbox, PendingBatch};
