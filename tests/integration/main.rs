//! Integration tests for the StudyHub client engine.
//!
//! Every test runs against a scripted in-memory backend under paused time,
//! so intervals and cadences are asserted deterministically.


mod accrual_test;
mod feeds_test;
mod heartbeat_test;
mod lifecycle_test;
mod roster_test;
