//! Roster polling, snapshot replacement, leaderboard order, and the
//! flush-vs-poll race.

use std::time::Duration;

use crate::helpers::{TestHarness, identity, roster_entry, run_for};

/// The roster is fetched immediately and then replaced wholesale on every
/// poll.
#[tokio::test(start_paused = true)]
async fn roster_snapshot_replaces_wholesale() {
    let h = TestHarness::new();
    h.backend
        .set_roster(vec![roster_entry("mira", 10), roster_entry("kai", 20)]);
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    run_for(Duration::from_millis(1)).await;
    assert_eq!(h.backend.roster_count(), 1);
    assert_eq!(h.engine.leaderboard().await.len(), 2);

    // kai drops out of the next snapshot entirely.
    h.backend.set_roster(vec![roster_entry("mira", 11)]);
    run_for(Duration::from_secs(5)).await;

    let board = h.engine.leaderboard().await;
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].username, "mira");
}

/// Leaderboard is ordered by descending study total.
#[tokio::test(start_paused = true)]
async fn leaderboard_sorted_by_total() {
    let h = TestHarness::new();
    h.backend.set_roster(vec![
        roster_entry("ana", 5),
        roster_entry("kai", 50),
        roster_entry("mira", 20),
    ]);
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    run_for(Duration::from_millis(1)).await;

    let names: Vec<String> = h
        .engine
        .leaderboard()
        .await
        .into_iter()
        .map(|e| e.username)
        .collect();
    assert_eq!(names, ["kai", "mira", "ana"]);
}

/// The documented flush-vs-poll race: a stale snapshot regresses the raw
/// roster, but the merged view of the user's own row never goes backwards.
#[tokio::test(start_paused = true)]
async fn stale_snapshot_regresses_raw_but_not_merged_self() {
    let h = TestHarness::new();
    h.backend.set_roster(vec![roster_entry("mira", 15)]);
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    run_for(Duration::from_millis(1)).await;
    assert_eq!(h.engine.leaderboard().await[0].total_minutes, 15);

    // A poll races a flush and comes back with the pre-flush total.
    h.backend.set_roster(vec![roster_entry("mira", 10)]);
    run_for(Duration::from_secs(5)).await;

    // The regression is real at the snapshot level...
    let raw = h.engine.roster().raw().await;
    assert_eq!(raw[0].total_minutes, 10);
    // ...but masked for the user's own row.
    assert_eq!(h.engine.leaderboard().await[0].total_minutes, 15);

    // Once the remote catches up, the view advances again.
    h.backend.set_roster(vec![roster_entry("mira", 17)]);
    run_for(Duration::from_secs(5)).await;
    assert_eq!(h.engine.leaderboard().await[0].total_minutes, 17);
}

/// Other users' rows follow the snapshot exactly, regressions included —
/// the high-water mask applies only to the user's own row.
#[tokio::test(start_paused = true)]
async fn other_rows_are_not_masked() {
    let h = TestHarness::new();
    h.backend.set_roster(vec![roster_entry("kai", 30)]);
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    run_for(Duration::from_millis(1)).await;
    h.backend.set_roster(vec![roster_entry("kai", 25)]);
    run_for(Duration::from_secs(5)).await;

    assert_eq!(h.engine.leaderboard().await[0].total_minutes, 25);
}

/// A failed poll keeps the previous snapshot instead of blanking the
/// display.
#[tokio::test(start_paused = true)]
async fn roster_polls_skip_while_backgrounded() {
    let h = TestHarness::new();
    h.backend.set_roster(vec![roster_entry("mira", 10)]);
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();

    run_for(Duration::from_millis(1)).await;
    let polled = h.backend.roster_count();
    assert_eq!(polled, 1);

    h.engine.foreground().set(false);
    run_for(Duration::from_secs(30)).await;
    assert_eq!(h.backend.roster_count(), polled);

    // The last snapshot stays on screen while backgrounded.
    assert_eq!(h.engine.leaderboard().await[0].total_minutes, 10);
}

/// A successful status update patches the own row ahead of the next poll.
#[tokio::test(start_paused = true)]
async fn status_update_is_optimistic() {
    let h = TestHarness::new();
    h.backend.set_roster(vec![roster_entry("mira", 10)]);
    h.engine.set_identity(Some(identity("mira"))).await.unwrap();
    run_for(Duration::from_millis(1)).await;

    h.engine.foreground().set(false); // freeze polling
    h.engine
        .set_status(studyhub_core::types::StatusMessage::new("deep work").unwrap())
        .await
        .unwrap();

    let board = h.engine.leaderboard().await;
    assert_eq!(board[0].status_text.as_deref(), Some("deep work"));
}
