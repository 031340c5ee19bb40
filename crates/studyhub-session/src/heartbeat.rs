//! Presence heartbeat loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing;

use studyhub_core::config::presence::PresenceConfig;
use studyhub_core::traits::presence::PresenceBackend;
use studyhub_core::types::Identity;

use crate::foreground::Foreground;

/// Run the heartbeat loop for an identity — runs until cancelled.
///
/// Fires once immediately, then on every interval tick. Skips the send
/// while backgrounded. Failures are logged and swallowed: the remote
/// service's own timeout policy decides when a silent user turns offline.
pub async fn run_heartbeat(
    backend: Arc<dyn PresenceBackend>,
    identity: Identity,
    foreground: Foreground,
    config: PresenceConfig,
    mut cancel: watch::Receiver<bool>,
) {
    let mut interval = time::interval(Duration::from_secs(config.heartbeat_interval_seconds));

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                if !foreground.is_foreground() {
                    tracing::trace!("Skipping heartbeat for '{}': backgrounded", identity);
                    continue;
                }
                if let Err(e) = backend.heartbeat(&identity).await {
                    tracing::warn!("Heartbeat for '{}' failed: {}", identity, e);
                }
            }
        }
    }

    tracing::debug!("Heartbeat loop ended for '{}'", identity);
}
