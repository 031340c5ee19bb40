//! Presence backend trait — the single capability seam for the remote
//! presence/study API.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{Identity, RosterEntry, StatusMessage};

/// Remote presence and study-time operations.
///
/// All durability, conflict resolution, and timeout policy live behind this
/// trait; the client only requests mutations and polls snapshots.
#[async_trait]
pub trait PresenceBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Keep-alive signal. A missed heartbeat has no local consequence; the
    /// remote timeout policy decides when a user turns offline.
    async fn heartbeat(&self, identity: &Identity) -> AppResult<()>;

    /// Durably add accrued study minutes for the identity. `minutes` is
    /// always nonzero.
    async fn flush_study_minutes(&self, identity: &Identity, minutes: u64) -> AppResult<()>;

    /// Fetch the authoritative roster snapshot of online users and totals.
    async fn fetch_roster(&self) -> AppResult<Vec<RosterEntry>>;

    /// Set the 24h status message for the identity.
    async fn set_status(&self, identity: &Identity, text: &StatusMessage) -> AppResult<()>;

    /// Change the display identity. Returns `false` when the remote service
    /// rejects the new name (e.g. already taken).
    async fn rename(&self, old: &Identity, new: &Identity) -> AppResult<bool>;

    /// Explicit departure notice. Callers treat this as best-effort and
    /// swallow errors.
    async fn leave(&self, identity: &Identity) -> AppResult<()>;
}
