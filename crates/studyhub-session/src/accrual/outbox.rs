//! Durable outbox for study minute batches.
//!
//! A flush that fails on a transient network error would otherwise lose the
//! whole batch. Instead, every batch is staged here before the first send
//! attempt and acknowledged (deleted) only on confirmed success, so the next
//! tick retries whatever is still pending.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use studyhub_core::result::AppResult;
use studyhub_core::traits::store::StateStore;
use studyhub_core::types::Identity;
use studyhub_store::{StoreManager, keys};

/// One staged batch of accrued minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBatch {
    /// Client-generated batch id.
    pub id: Uuid,
    /// Whole minutes in the batch. Always nonzero.
    pub minutes: u64,
}

/// Persisted pending-minutes log for one identity.
#[derive(Debug, Clone)]
pub struct Outbox {
    store: StoreManager,
    key: String,
}

impl Outbox {
    /// Open the outbox of an identity.
    pub fn new(store: StoreManager, identity: &Identity) -> Self {
        Self {
            store,
            key: keys::pending_minutes(identity.as_str()),
        }
    }

    /// All staged batches, oldest first.
    pub async fn batches(&self) -> AppResult<Vec<PendingBatch>> {
        Ok(self
            .store
            .get_json(&self.key)
            .await?
            .unwrap_or_default())
    }

    /// Total staged minutes.
    pub async fn pending_minutes(&self) -> AppResult<u64> {
        Ok(self.batches().await?.iter().map(|b| b.minutes).sum())
    }

    /// Stage a new batch. Zero-minute batches are never staged.
    pub async fn push(&self, minutes: u64) -> AppResult<()> {
        if minutes == 0 {
            return Ok(());
        }
        let mut batches = self.batches().await?;
        batches.push(PendingBatch {
            id: Uuid::new_v4(),
            minutes,
        });
        self.store.set_json(&self.key, &batches).await
    }

    /// Acknowledge a delivered (or permanently failed) batch.
    pub async fn ack(&self, id: Uuid) -> AppResult<()> {
        let mut batches = self.batches().await?;
        batches.retain(|b| b.id != id);
        if batches.is_empty() {
            self.store.delete(&self.key).await
        } else {
            self.store.set_json(&self.key, &batches).await
        }
    }

    /// Move every staged batch into another outbox (used on rename, so
    /// undelivered minutes follow the identity).
    pub async fn drain_into(&self, other: &Outbox) -> AppResult<()> {
        let batches = self.batches().await?;
        for batch in &batches {
            other.push(batch.minutes).await?;
        }
        self.store.delete(&self.key).await
    }
}
