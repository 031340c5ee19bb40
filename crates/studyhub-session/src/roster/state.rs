//! Roster snapshot state and the self high-water merge.

use dashmap::DashMap;
use tokio::sync::RwLock;

use studyhub_core::types::{Identity, RosterEntry};

/// Holds the latest roster snapshot and per-identity display high-water
/// marks.
///
/// Snapshots replace each other wholesale — no diffing, no conflict
/// resolution. The one local adjustment is the self row: a flush and a poll
/// can race, and a stale pre-flush snapshot would otherwise roll the user's
/// own total backwards on screen. The merged view therefore shows
/// `max(snapshot_total, high_water)` for the user's own row.
#[derive(Debug, Default)]
pub struct RosterState {
    /// Latest raw snapshot, as fetched.
    snapshot: RwLock<Vec<RosterEntry>>,
    /// Username → largest total already shown for that identity's own row.
    high_water: DashMap<String, u64>,
}

impl RosterState {
    /// Create an empty roster state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a freshly fetched one.
    pub async fn apply_snapshot(&self, entries: Vec<RosterEntry>) {
        *self.snapshot.write().await = entries;
    }

    /// The raw snapshot, exactly as the remote service reported it.
    pub async fn raw(&self) -> Vec<RosterEntry> {
        self.snapshot.read().await.clone()
    }

    /// The merged display view: self row masked by the high-water mark,
    /// sorted by descending study total. Ties keep snapshot order.
    pub async fn leaderboard(&self, own: Option<&Identity>) -> Vec<RosterEntry> {
        let mut entries = self.snapshot.read().await.clone();

        if let Some(own) = own {
            for entry in entries.iter_mut() {
                if entry.username == own.as_str() {
                    let mut mark = self
                        .high_water
                        .entry(entry.username.clone())
                        .or_insert(entry.total_minutes);
                    if entry.total_minutes > *mark {
                        *mark = entry.total_minutes;
                    } else {
                        entry.total_minutes = *mark;
                    }
                }
            }
        }

        entries.sort_by(|a, b| b.total_minutes.cmp(&a.total_minutes));
        entries
    }

    /// Optimistically patch the self row's status text after a successful
    /// `/user/status` call, ahead of the next poll reflecting it.
    pub async fn patch_status_text(&self, own: &Identity, text: &str) {
        let mut snapshot = self.snapshot.write().await;
        for entry in snapshot.iter_mut() {
            if entry.username == own.as_str() {
                entry.status_text = Some(text.to_string());
            }
        }
    }

    /// Forget the high-water mark of an identity (logout, rename).
    pub fn clear_high_water(&self, own: &Identity) {
        self.high_water.remove(own.as_str());
    }
}
