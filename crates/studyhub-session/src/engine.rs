//! Session engine — identity lifecycle and loop wiring.
//!
//! One explicitly constructed engine per client. Setting an identity starts
//! the heartbeat and roster loops; joining a study session starts the
//! accrual loop; logout tears everything down in order (final flush first,
//! then a best-effort departure notice). There is no ambient global state:
//! the engine is built in `main` and handles are passed down.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing;

use studyhub_core::config::AppConfig;
use studyhub_core::config::accrual::AccrualConfig;
use studyhub_core::config::presence::PresenceConfig;
use studyhub_core::config::roster::RosterConfig;
use studyhub_core::result::AppResult;
use studyhub_core::traits::presence::PresenceBackend;
use studyhub_core::traits::store::StateStore;
use studyhub_core::types::{Identity, RosterEntry, StatusMessage};
use studyhub_store::{StoreManager, keys};

use crate::accrual::{Outbox, run_accrual};
use crate::foreground::Foreground;
use crate::heartbeat::run_heartbeat;
use crate::roster::{RosterState, run_roster_poll};

/// Engine timing configuration, cut down from the application config so
/// tests can construct it without a full `AppConfig`.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Heartbeat settings.
    pub presence: PresenceConfig,
    /// Accrual settings.
    pub accrual: AccrualConfig,
    /// Roster polling settings.
    pub roster: RosterConfig,
}

impl EngineConfig {
    /// Extract the engine sections from the application config.
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            presence: config.presence.clone(),
            accrual: config.accrual.clone(),
            roster: config.roster.clone(),
        }
    }
}

/// Handles of the identity-scoped presence loops (heartbeat + roster).
#[derive(Debug)]
struct PresenceLoops {
    cancel: watch::Sender<bool>,
    heartbeat: JoinHandle<()>,
    roster: JoinHandle<()>,
}

/// Handle of the running accrual loop.
#[derive(Debug)]
struct AccrualLoop {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
    unsaved: watch::Receiver<u64>,
}

#[derive(Debug, Default)]
struct EngineState {
    identity: Option<Identity>,
    presence: Option<PresenceLoops>,
    accrual: Option<AccrualLoop>,
}

/// The session and accrual engine.
#[derive(Debug)]
pub struct SessionEngine {
    backend: Arc<dyn PresenceBackend>,
    store: StoreManager,
    config: EngineConfig,
    foreground: Foreground,
    roster: Arc<RosterState>,
    state: Mutex<EngineState>,
}

impl SessionEngine {
    /// Create an engine with no active identity.
    pub fn new(backend: Arc<dyn PresenceBackend>, store: StoreManager, config: EngineConfig) -> Self {
        Self {
            backend,
            store,
            config,
            foreground: Foreground::new(),
            roster: Arc::new(RosterState::new()),
            state: Mutex::new(EngineState::default()),
        }
    }

    /// The foreground gate handle, for the UI layer to toggle.
    pub fn foreground(&self) -> Foreground {
        self.foreground.clone()
    }

    /// The roster state, for display layers that want raw snapshots.
    pub fn roster(&self) -> Arc<RosterState> {
        Arc::clone(&self.roster)
    }

    /// The currently active identity, if any.
    pub async fn identity(&self) -> Option<Identity> {
        self.state.lock().await.identity.clone()
    }

    /// Restore the persisted identity from a previous run and start its
    /// loops. Returns the restored identity, if one was stored.
    pub async fn restore(&self) -> AppResult<Option<Identity>> {
        let stored: Option<Identity> = self.store.get_json(&keys::identity()).await?;
        if let Some(identity) = stored.clone() {
            tracing::info!("Restoring persisted identity '{}'", identity);
            self.set_identity(Some(identity)).await?;
        }
        Ok(stored)
    }

    /// Whether the previous run was mid-study when it ended.
    pub async fn persisted_studying(&self) -> AppResult<bool> {
        Ok(self
            .store
            .get_json(&keys::studying())
            .await?
            .unwrap_or(false))
    }

    /// Set or clear the active identity.
    ///
    /// A non-null identity is persisted and its loops are started; setting
    /// the same identity again is a no-op. Null is an explicit logout:
    /// final flush, loop teardown, best-effort departure notice, and the
    /// persisted identity is cleared.
    pub async fn set_identity(&self, identity: Option<Identity>) -> AppResult<()> {
        let mut state = self.state.lock().await;

        match identity {
            Some(identity) => {
                if state.identity.as_ref() == Some(&identity) {
                    return Ok(());
                }

                if state.identity.is_some() {
                    self.teardown(&mut state, true).await;
                }

                self.store
                    .set_json(&keys::identity(), &identity)
                    .await?;
                self.start_presence(&mut state, &identity);
                state.identity = Some(identity);
                Ok(())
            }
            None => {
                if state.identity.is_none() {
                    return Ok(());
                }

                self.teardown(&mut state, true).await;
                self.store.delete(&keys::identity()).await?;
                self.store.delete(&keys::studying()).await?;
                Ok(())
            }
        }
    }

    /// Whether a study session is currently active.
    pub async fn is_studying(&self) -> bool {
        self.state.lock().await.accrual.is_some()
    }

    /// Unsaved minutes accrued since the last flush, for display.
    pub async fn unsaved_minutes(&self) -> u64 {
        let state = self.state.lock().await;
        state
            .accrual
            .as_ref()
            .map(|a| *a.unsaved.borrow())
            .unwrap_or(0)
    }

    /// Join or leave the study session. Idempotent: repeating the current
    /// value is a no-op. Leaving flushes any partial batch before the loop
    /// stops.
    pub async fn set_studying(&self, studying: bool) -> AppResult<()> {
        let mut state = self.state.lock().await;

        let Some(identity) = state.identity.clone() else {
            tracing::warn!("Ignoring set_studying({studying}): no active identity");
            return Ok(());
        };

        if studying {
            if state.accrual.is_some() {
                return Ok(());
            }
            self.store.set_json(&keys::studying(), &true).await?;
            self.start_accrual(&mut state, &identity);
        } else {
            if state.accrual.is_none() {
                return Ok(());
            }
            stop_accrual(&mut state).await;
            self.store.set_json(&keys::studying(), &false).await?;
        }
        Ok(())
    }

    /// The merged leaderboard view, own row masked by the high-water mark.
    pub async fn leaderboard(&self) -> Vec<RosterEntry> {
        let identity = self.identity().await;
        self.roster.leaderboard(identity.as_ref()).await
    }

    /// Set the 24h status message and optimistically patch the own roster
    /// row ahead of the next poll.
    pub async fn set_status(&self, text: StatusMessage) -> AppResult<()> {
        let Some(identity) = self.identity().await else {
            tracing::warn!("Ignoring status update: no active identity");
            return Ok(());
        };

        self.backend.set_status(&identity, &text).await?;
        self.roster.patch_status_text(&identity, text.as_str()).await;
        Ok(())
    }

    /// Change the display identity. On success every loop is restarted
    /// under the new name and undelivered minutes follow it; a remote
    /// rejection leaves the session untouched and returns `false`.
    pub async fn rename(&self, new: Identity) -> AppResult<bool> {
        let mut state = self.state.lock().await;

        let Some(old) = state.identity.clone() else {
            tracing::warn!("Ignoring rename: no active identity");
            return Ok(false);
        };
        if old == new {
            return Ok(true);
        }

        // Flush under the old name first so the renamed record carries the
        // minutes accrued so far.
        let was_studying = state.accrual.is_some();
        stop_accrual(&mut state).await;

        let accepted = match self.backend.rename(&old, &new).await {
            Ok(accepted) => accepted,
            Err(e) => {
                if was_studying {
                    self.start_accrual(&mut state, &old);
                }
                return Err(e);
            }
        };

        if !accepted {
            if was_studying {
                self.start_accrual(&mut state, &old);
            }
            return Ok(false);
        }

        stop_presence(&mut state).await;
        let old_outbox = Outbox::new(self.store.clone(), &old);
        let new_outbox = Outbox::new(self.store.clone(), &new);
        if let Err(e) = old_outbox.drain_into(&new_outbox).await {
            tracing::warn!("Failed to move pending minutes from '{}' to '{}': {}", old, new, e);
        }
        self.roster.clear_high_water(&old);

        self.store.set_json(&keys::identity(), &new).await?;
        self.start_presence(&mut state, &new);
        state.identity = Some(new.clone());
        if was_studying {
            self.start_accrual(&mut state, &new);
        }

        tracing::info!("Renamed '{}' to '{}'", old, new);
        Ok(true)
    }

    /// Process teardown: stop every loop (final flush included) and send a
    /// bounded departure notice, but keep the persisted identity so the
    /// next launch resumes it.
    pub async fn shutdown(&self) -> AppResult<()> {
        let mut state = self.state.lock().await;
        self.teardown(&mut state, false).await;
        Ok(())
    }

    /// Stop every loop and notify the remote service of departure.
    /// `clear_identity` also forgets the in-memory identity.
    async fn teardown(&self, state: &mut EngineState, clear_identity: bool) {
        stop_accrual(state).await;
        stop_presence(state).await;

        if let Some(identity) = state.identity.clone() {
            // Best-effort: the remote heartbeat timeout covers a lost notice.
            if let Err(e) = self.backend.leave(&identity).await {
                tracing::debug!("Departure notice for '{}' failed: {}", identity, e);
            }
            self.roster.clear_high_water(&identity);
        }

        if clear_identity {
            state.identity = None;
        }
    }

    fn start_presence(&self, state: &mut EngineState, identity: &Identity) {
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let heartbeat = tokio::spawn(run_heartbeat(
            Arc::clone(&self.backend),
            identity.clone(),
            self.foreground.clone(),
            self.config.presence.clone(),
            cancel_rx.clone(),
        ));
        let roster = tokio::spawn(run_roster_poll(
            Arc::clone(&self.backend),
            Arc::clone(&self.roster),
            self.foreground.clone(),
            self.config.roster.clone(),
            cancel_rx,
        ));

        state.presence = Some(PresenceLoops {
            cancel: cancel_tx,
            heartbeat,
            roster,
        });
        tracing::info!("Presence loops started for '{}'", identity);
    }

    fn start_accrual(&self, state: &mut EngineState, identity: &Identity) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (unsaved_tx, unsaved_rx) = watch::channel(0u64);
        let outbox = Outbox::new(self.store.clone(), identity);

        let handle = tokio::spawn(run_accrual(
            Arc::clone(&self.backend),
            identity.clone(),
            self.config.accrual.clone(),
            outbox,
            unsaved_tx,
            cancel_rx,
        ));

        state.accrual = Some(AccrualLoop {
            cancel: cancel_tx,
            handle,
            unsaved: unsaved_rx,
        });
        tracing::info!("Study session started for '{}'", identity);
    }
}

/// Cancel the accrual loop and wait for its final flush to finish.
async fn stop_accrual(state: &mut EngineState) {
    if let Some(accrual) = state.accrual.take() {
        let _ = accrual.cancel.send(true);
        let _ = accrual.handle.await;
    }
}

/// Cancel the presence loops and wait for them to exit.
async fn stop_presence(state: &mut EngineState) {
    if let Some(loops) = state.presence.take() {
        let _ = loops.cancel.send(true);
        let _ = loops.heartbeat.await;
        let _ = loops.roster.await;
    }
}
