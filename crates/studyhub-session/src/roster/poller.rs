//! Online roster polling loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing;

use studyhub_core::config::roster::RosterConfig;
use studyhub_core::traits::presence::PresenceBackend;

use super::state::RosterState;
use crate::foreground::Foreground;

/// Run the roster polling loop — runs until cancelled.
///
/// Fires once immediately, then on every interval tick. Skips the fetch
/// while backgrounded. A failed poll keeps the previous snapshot; stale is
/// acceptable until the next successful fetch.
pub async fn run_roster_poll(
    backend: Arc<dyn PresenceBackend>,
    state: Arc<RosterState>,
    foreground: Foreground,
    config: RosterConfig,
    mut cancel: watch::Receiver<bool>,
) {
    let mut interval = time::interval(Duration::from_secs(config.poll_interval_seconds));

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                if !foreground.is_foreground() {
                    tracing::trace!("Skipping roster poll: backgrounded");
                    continue;
                }
                match backend.fetch_roster().await {
                    Ok(snapshot) => state.apply_snapshot(snapshot).await,
                    Err(e) => tracing::debug!("Roster poll failed, keeping previous snapshot: {}", e),
                }
            }
        }
    }

    tracing::debug!("Roster poll loop ended");
}
