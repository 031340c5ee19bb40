//! Study accrual loop.
//!
//! While a study session is active, one tick fires per configured interval
//! and adds one minute unit to a loop-owned counter. The counter is flushed
//! to the remote service every `flush_batch_ticks` ticks, and once more on
//! the way out so a partial batch is never silently dropped. The sub-tick
//! remainder (e.g. 37s of a 60s tick) is dropped by design.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing;

use studyhub_core::config::accrual::AccrualConfig;
use studyhub_core::traits::presence::PresenceBackend;
use studyhub_core::types::Identity;

use super::outbox::Outbox;

/// Run the accrual loop for an identity — runs until cancelled.
///
/// The first tick fires immediately, so a short session still counts its
/// first interval. The unsaved counter is owned by this task alone;
/// `unsaved_tx` mirrors it for display.
pub async fn run_accrual(
    backend: Arc<dyn PresenceBackend>,
    identity: Identity,
    config: AccrualConfig,
    outbox: Outbox,
    unsaved_tx: watch::Sender<u64>,
    mut cancel: watch::Receiver<bool>,
) {
    let mut unsaved: u64 = 0;
    let mut interval = time::interval(Duration::from_secs(config.tick_interval_seconds));

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            _ = interval.tick() => {
                unsaved += 1;
                let _ = unsaved_tx.send(unsaved);
                tracing::trace!("Accrual tick for '{}': {} unsaved", identity, unsaved);

                if unsaved >= config.flush_batch_ticks {
                    flush(&*backend, &identity, &outbox, &mut unsaved).await;
                    let _ = unsaved_tx.send(unsaved);
                }
            }
        }
    }

    // Final flush of any partial batch before the loop stops.
    if unsaved > 0 {
        flush(&*backend, &identity, &outbox, &mut unsaved).await;
        let _ = unsaved_tx.send(unsaved);
    }

    tracing::debug!("Accrual loop ended for '{}'", identity);
}

/// Stage the current counter into the outbox, then try to deliver every
/// staged batch. Batches are acknowledged only on confirmed success, so a
/// transient failure leaves them to be retried on the next flush.
async fn flush(
    backend: &dyn PresenceBackend,
    identity: &Identity,
    outbox: &Outbox,
    unsaved: &mut u64,
) {
    if *unsaved > 0 {
        if let Err(e) = outbox.push(*unsaved).await {
            // Couldn't stage durably; keep counting and try again next tick.
            tracing::warn!("Failed to stage {} minutes for '{}': {}", unsaved, identity, e);
            return;
        }
        *unsaved = 0;
    }

    let batches = match outbox.batches().await {
        Ok(batches) => batches,
        Err(e) => {
            tracing::warn!("Failed to read outbox for '{}': {}", identity, e);
            return;
        }
    };

    for batch in batches {
        match backend.flush_study_minutes(identity, batch.minutes).await {
            Ok(()) => {
                if let Err(e) = outbox.ack(batch.id).await {
                    tracing::warn!("Failed to ack batch {} for '{}': {}", batch.id, identity, e);
                }
            }
            Err(e) if e.is_transient() => {
                tracing::warn!(
                    "Flush of {} minutes for '{}' failed, will retry: {}",
                    batch.minutes,
                    identity,
                    e
                );
                // Stop here; later batches would arrive out of order.
                break;
            }
            Err(e) => {
                tracing::error!(
                    "Flush of {} minutes for '{}' rejected, dropping batch: {}",
                    batch.minutes,
                    identity,
                    e
                );
                let _ = outbox.ack(batch.id).await;
            }
        }
    }
}
