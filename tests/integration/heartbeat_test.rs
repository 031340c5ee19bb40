//! Heartbeat cadence, foreground gating, and failure tolerance.

use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::helpers::{TestHarness, at_about, identity, run_for};

/// A heartbeat goes out immediately at identity set, then once per
/// configured interval.
#[tokio::test(start_paused = true)]
async fn heartbeat_fires_immediately_then_on_cadence() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    run_for(Duration::from_secs(121)).await;

    let times = h.backend.heartbeat_times();
    assert_eq!(times.len(), 3);
    assert!(at_about(times[0], 0));
    assert!(at_about(times[1], 60));
    assert!(at_about(times[2], 120));
}

/// Backgrounded clients skip heartbeats; foregrounding resumes them on the
/// next tick.
#[tokio::test(start_paused = true)]
async fn heartbeat_skipped_while_backgrounded() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    run_for(Duration::from_millis(1)).await;
    assert_eq!(h.backend.heartbeat_times().len(), 1);

    h.engine.foreground().set(false);
    run_for(Duration::from_secs(180)).await;
    assert_eq!(h.backend.heartbeat_times().len(), 1);

    h.engine.foreground().set(true);
    run_for(Duration::from_secs(60)).await;
    assert_eq!(h.backend.heartbeat_times().len(), 2);
}

/// Heartbeat failures are swallowed: the loop keeps going and nothing else
/// is torn down.
#[tokio::test(start_paused = true)]
async fn heartbeat_failures_are_swallowed() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    h.backend.fail_heartbeats.store(true, Ordering::Relaxed);
    run_for(Duration::from_secs(121)).await;

    // Every attempt was made despite the failures.
    assert_eq!(h.backend.heartbeat_times().len(), 3);
    assert_eq!(h.engine.identity().await, Some(identity("mira")));

    h.backend.fail_heartbeats.store(false, Ordering::Relaxed);
    run_for(Duration::from_secs(60)).await;
    assert_eq!(h.backend.heartbeat_times().len(), 4);
}

/// The accrual loop is not foreground-gated: studying in a background
/// window still counts and still flushes.
#[tokio::test(start_paused = true)]
async fn accrual_keeps_ticking_while_backgrounded() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();
    h.engine.foreground().set(false);

    run_for(Duration::from_secs(241)).await;

    assert_eq!(h.backend.flush_amounts(), vec![5]);
}
