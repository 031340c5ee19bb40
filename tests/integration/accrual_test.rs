//! Study accrual behavior: tick counting, batched flushes, final flush,
//! and the durable outbox retry.

use std::time::Duration;

use crate::helpers::{TestHarness, identity, run_for, test_config};

use studyhub_core::config::accrual::AccrualConfig;
use studyhub_session::EngineConfig;
use studyhub_session::accrual::Outbox;

/// While studying, every tick adds exactly one minute and the counter plus
/// delivered flushes always equals the tick count.
#[tokio::test(start_paused = true)]
async fn accrual_is_monotonic_per_tick() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();

    // Ticks fire at 0s, 60s, 120s.
    run_for(Duration::from_millis(1)).await;
    assert_eq!(h.engine.unsaved_minutes().await, 1);

    run_for(Duration::from_secs(130)).await;
    assert_eq!(h.engine.unsaved_minutes().await, 3);
    assert!(h.backend.flush_amounts().is_empty());

    // Tick 5 at 240s triggers the batch flush and resets the counter.
    run_for(Duration::from_secs(111)).await;
    assert_eq!(h.backend.flush_amounts(), vec![5]);
    assert_eq!(h.engine.unsaved_minutes().await, 0);
}

/// The Kth tick triggers exactly one flush carrying K minutes; zero-minute
/// requests are never sent.
#[tokio::test(start_paused = true)]
async fn flush_threshold_sends_one_full_batch() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();

    run_for(Duration::from_secs(241)).await;

    let flushes = h.backend.flush_amounts();
    assert_eq!(flushes, vec![5]);
    assert!(flushes.iter().all(|&m| m > 0));
}

/// Leaving with a partial batch flushes exactly the unsaved remainder.
#[tokio::test(start_paused = true)]
async fn leaving_flushes_partial_batch() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();

    // Three ticks: 0s, 60s, 120s.
    run_for(Duration::from_secs(130)).await;
    h.engine.set_studying(false).await.unwrap();

    assert_eq!(h.backend.flush_amounts(), vec![3]);
    assert!(!h.engine.is_studying().await);
}

/// Short session: one tick, then leave — one flush of exactly one minute.
#[tokio::test(start_paused = true)]
async fn short_session_counts_first_interval() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();

    run_for(Duration::from_secs(59)).await;
    h.engine.set_studying(false).await.unwrap();

    assert_eq!(h.backend.flush_amounts(), vec![1]);
}

/// Long session with batching of 5: 12 ticks, leaving mid-batch, reports
/// 5 + 5 + 2 = 12 minutes total.
#[tokio::test(start_paused = true)]
async fn long_session_batches_then_flushes_remainder() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();

    // Twelve ticks: 0s through 660s.
    run_for(Duration::from_secs(661)).await;
    h.engine.set_studying(false).await.unwrap();

    let flushes = h.backend.flush_amounts();
    assert_eq!(flushes, vec![5, 5, 2]);
    assert_eq!(flushes.iter().sum::<u64>(), 12);
}

/// While idle, no flush request is ever issued no matter how long the
/// client sits there.
#[tokio::test(start_paused = true)]
async fn idle_sends_no_flushes() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    run_for(Duration::from_secs(600)).await;

    assert!(h.backend.flush_amounts().is_empty());
    assert_eq!(h.engine.unsaved_minutes().await, 0);
}

/// A transiently failed flush keeps the batch in the outbox and retries on
/// the next tick; nothing is lost.
#[tokio::test(start_paused = true)]
async fn failed_flush_retries_from_outbox() {
    let config = EngineConfig {
        accrual: AccrualConfig {
            tick_interval_seconds: 60,
            flush_batch_ticks: 1,
        },
        ..test_config()
    };
    let h = TestHarness::with_config(config);
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    h.backend
        .fail_flushes
        .store(true, std::sync::atomic::Ordering::Relaxed);
    h.engine.set_studying(true).await.unwrap();

    // Two ticks fail: both batches stay staged.
    run_for(Duration::from_secs(61)).await;
    assert_eq!(h.backend.flush_amounts().len(), 2);

    // Network recovers; the third tick drains the backlog plus itself.
    h.backend
        .fail_flushes
        .store(false, std::sync::atomic::Ordering::Relaxed);
    run_for(Duration::from_secs(60)).await;
    h.engine.set_studying(false).await.unwrap();

    // Five attempts total: two failures, then three delivered minutes.
    assert_eq!(h.backend.flush_amounts(), vec![1, 1, 1, 1, 1]);

    let outbox = Outbox::new(h.store.clone(), &identity("mira"));
    assert_eq!(outbox.pending_minutes().await.unwrap(), 0);
}

/// Minutes staged but undelivered when the client stops are still there
/// for the next run.
#[tokio::test(start_paused = true)]
async fn undelivered_minutes_survive_restart() {
    let config = EngineConfig {
        accrual: AccrualConfig {
            tick_interval_seconds: 60,
            flush_batch_ticks: 5,
        },
        ..test_config()
    };
    let h = TestHarness::with_config(config.clone());
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    h.backend
        .fail_flushes
        .store(true, std::sync::atomic::Ordering::Relaxed);
    h.engine.set_studying(true).await.unwrap();
    run_for(Duration::from_secs(130)).await;
    // Final flush fails; the three minutes stay staged durably.
    h.engine.set_studying(false).await.unwrap();

    let outbox = Outbox::new(h.store.clone(), &identity("mira"));
    assert_eq!(outbox.pending_minutes().await.unwrap(), 3);

    // A new engine over the same store delivers the backlog on its first
    // flush attempt.
    let h2 = TestHarness::with_store(config, h.store.clone());
    h2.engine
        .set_identity(Some(identity("mira")))
        .await
        .unwrap();
    h2.engine.set_studying(true).await.unwrap();
    run_for(Duration::from_secs(241)).await;

    assert_eq!(h2.backend.flush_amounts(), vec![3, 5]);
    assert_eq!(outbox.pending_minutes().await.unwrap(), 0);
}
