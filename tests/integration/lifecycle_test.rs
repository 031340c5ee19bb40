//! Identity lifecycle: logout teardown, idempotence, restore, rename,
//! shutdown.

use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::helpers::{Call, CallKind, TestHarness, identity, run_for, test_config};

use studyhub_core::traits::store::StateStore;
use studyhub_store::keys;

/// Logout while studying: final flush, departure notice, loops stopped,
/// persisted identity cleared.
#[tokio::test(start_paused = true)]
async fn logout_flushes_then_leaves() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();

    run_for(Duration::from_secs(130)).await;
    h.engine.set_identity(None).await.unwrap();

    assert_eq!(h.backend.flush_amounts(), vec![3]);
    assert_eq!(h.backend.leave_count(), 1);
    assert!(!h.engine.is_studying().await);
    assert_eq!(h.engine.identity().await, None);

    // The flush lands before the departure notice.
    let calls = h.backend.calls();
    let flush_pos = position(&calls, |k| matches!(k, CallKind::Flush { .. }));
    let leave_pos = position(&calls, |k| matches!(k, CallKind::Leave(_)));
    assert!(flush_pos.unwrap() < leave_pos.unwrap());

    // Persisted identity is gone.
    let stored: Option<studyhub_core::types::Identity> =
        h.store.get_json(&keys::identity()).await.unwrap();
    assert!(stored.is_none());

    // And every loop is dead.
    let before = h.backend.calls().len();
    run_for(Duration::from_secs(300)).await;
    assert_eq!(h.backend.calls().len(), before);
}

/// `set_studying` is idempotent in both directions.
#[tokio::test(start_paused = true)]
async fn set_studying_is_idempotent() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    h.engine.set_studying(true).await.unwrap();
    h.engine.set_studying(true).await.unwrap();
    run_for(Duration::from_secs(59)).await;

    h.engine.set_studying(false).await.unwrap();
    h.engine.set_studying(false).await.unwrap();

    // One tick, one flush — the duplicate calls changed nothing.
    assert_eq!(h.backend.flush_amounts(), vec![1]);
}

/// Joining a session with no identity is a warned no-op.
#[tokio::test(start_paused = true)]
async fn studying_without_identity_is_a_noop() {
    let h = TestHarness::new();
    h.engine.set_studying(true).await.unwrap();

    run_for(Duration::from_secs(300)).await;

    assert!(!h.engine.is_studying().await);
    assert!(h.backend.calls().is_empty());
}

/// Shutdown keeps the persisted identity and studying flag so the next
/// launch resumes the session.
#[tokio::test(start_paused = true)]
async fn shutdown_preserves_persisted_session() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();
    run_for(Duration::from_secs(59)).await;

    h.engine.shutdown().await.unwrap();
    assert_eq!(h.backend.flush_amounts(), vec![1]);
    assert_eq!(h.backend.leave_count(), 1);

    // A fresh engine over the same store picks the session back up.
    let h2 = TestHarness::with_store(test_config(), h.store.clone());
    let restored = h2.engine.restore().await.unwrap();
    assert_eq!(restored, Some(identity("mira")));
    assert!(h2.engine.persisted_studying().await.unwrap());

    run_for(Duration::from_millis(1)).await;
    assert_eq!(h2.backend.heartbeat_times().len(), 1);
}

/// Setting the same identity again does not restart the loops.
#[tokio::test(start_paused = true)]
async fn same_identity_is_a_noop() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    run_for(Duration::from_secs(30)).await;

    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    run_for(Duration::from_secs(31)).await;

    // No leave, no loop restart: beats stay on the original cadence.
    assert_eq!(h.backend.leave_count(), 0);
    assert_eq!(h.backend.heartbeat_times().len(), 2);
}

/// An accepted rename restarts every loop under the new name; minutes
/// accrued before the rename are flushed under the old one.
#[tokio::test(start_paused = true)]
async fn rename_restarts_loops_under_new_name() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();
    run_for(Duration::from_secs(130)).await;

    assert!(h.engine.rename(identity("kai")).await.unwrap());
    assert_eq!(h.engine.identity().await, Some(identity("kai")));
    // Pre-rename minutes went out under the old name, with no departure
    // notice (the remote record was renamed, not removed).
    assert!(h.backend.calls().iter().any(|c| matches!(
        &c.kind,
        CallKind::Flush { username, minutes } if username == "mira" && *minutes == 3
    )));
    assert_eq!(h.backend.leave_count(), 0);

    // Still studying; new beats carry the new name.
    assert!(h.engine.is_studying().await);
    run_for(Duration::from_secs(61)).await;
    let last_beat = h.backend.heartbeat_times().len();
    assert!(last_beat >= 2);
    let beats: Vec<String> = h
        .backend
        .calls()
        .into_iter()
        .filter_map(|c| match c.kind {
            CallKind::Heartbeat(name) => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(beats.last().map(String::as_str), Some("kai"));

    h.engine.set_studying(false).await.unwrap();
    let calls = h.backend.calls();
    let last_flush = calls
        .iter()
        .rev()
        .find_map(|c| match &c.kind {
            CallKind::Flush { username, .. } => Some(username.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_flush, "kai");
}

/// A rejected rename leaves the session untouched.
#[tokio::test(start_paused = true)]
async fn rejected_rename_changes_nothing() {
    let h = TestHarness::new();
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    h.engine.set_studying(true).await.unwrap();
    h.backend.accept_rename.store(false, Ordering::Relaxed);

    run_for(Duration::from_secs(59)).await;
    assert!(!h.engine.rename(identity("kai")).await.unwrap());

    assert_eq!(h.engine.identity().await, Some(identity("mira")));
    assert!(h.engine.is_studying().await);

    run_for(Duration::from_secs(61)).await;
    let beats: Vec<String> = h
        .backend
        .calls()
        .into_iter()
        .filter_map(|c| match c.kind {
            CallKind::Heartbeat(name) => Some(name),
            _ => None,
        })
        .collect();
    assert!(beats.iter().all(|name| name == "mira"));
}

fn position(calls: &[Call], pred: impl Fn(&CallKind) -> bool) -> Option<usize> {
    calls.iter().position(|c| pred(&c.kind))
}
