//! Notification feed: polling loop and read-marker bookkeeping.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time;
use tracing;

use studyhub_core::config::notify::NotificationConfig;
use studyhub_core::result::AppResult;
use studyhub_core::traits::notification::NotificationBackend;
use studyhub_core::traits::store::StateStore;
use studyhub_core::types::{Identity, Notification};
use studyhub_session::Foreground;
use studyhub_store::{StoreManager, keys};

#[derive(Debug)]
struct FeedLoop {
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Polling notification feed with per-identity read markers.
#[derive(Debug)]
pub struct NotificationFeed {
    backend: Arc<dyn NotificationBackend>,
    config: NotificationConfig,
    store: StoreManager,
    identity: Identity,
    foreground: Foreground,
    items: RwLock<Vec<Notification>>,
    read_ids: RwLock<HashSet<String>>,
    poll: Mutex<Option<FeedLoop>>,
}

impl NotificationFeed {
    /// Create a feed for an identity, loading its persisted read markers.
    pub async fn new(
        backend: Arc<dyn NotificationBackend>,
        config: NotificationConfig,
        store: StoreManager,
        identity: Identity,
        foreground: Foreground,
    ) -> AppResult<Arc<Self>> {
        let read_ids: HashSet<String> = store
            .get_json(&keys::read_notifications(identity.as_str()))
            .await?
            .unwrap_or_default();

        Ok(Arc::new(Self {
            backend,
            config,
            store,
            identity,
            foreground,
            items: RwLock::new(Vec::new()),
            read_ids: RwLock::new(read_ids),
            poll: Mutex::new(None),
        }))
    }

    /// Start the polling loop. Fires immediately.
    pub async fn start(feed: &Arc<Self>) {
        let mut poll = feed.poll.lock().await;
        if poll.is_some() {
            return;
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let handle = tokio::spawn(Arc::clone(feed).run_poll(cancel_rx));

        *poll = Some(FeedLoop {
            cancel: cancel_tx,
            handle,
        });
        tracing::info!("Notification feed started for '{}'", feed.identity);
    }

    /// Stop the polling loop.
    pub async fn stop(&self) {
        let mut poll = self.poll.lock().await;
        if let Some(poll) = poll.take() {
            let _ = poll.cancel.send(true);
            let _ = poll.handle.await;
        }
    }

    /// The current feed, newest first, with local read flags applied.
    pub async fn notifications(&self) -> Vec<Notification> {
        let read_ids = self.read_ids.read().await;
        self.items
            .read()
            .await
            .iter()
            .cloned()
            .map(|mut n| {
                n.read = read_ids.contains(&n.id);
                n
            })
            .collect()
    }

    /// Count of unread notifications.
    pub async fn unread_count(&self) -> usize {
        self.notifications().await.iter().filter(|n| !n.read).count()
    }

    /// Mark one notification as read. Local-only: the marker is persisted
    /// for this identity and never sent to the wire.
    pub async fn mark_read(&self, id: &str) -> AppResult<()> {
        {
            let mut read_ids = self.read_ids.write().await;
            if !read_ids.insert(id.to_string()) {
                return Ok(());
            }
        }

        let read_ids = self.read_ids.read().await;
        self.store
            .set_json(&keys::read_notifications(self.identity.as_str()), &*read_ids)
            .await
    }

    async fn run_poll(self: Arc<Self>, mut cancel: watch::Receiver<bool>) {
        let mut interval =
            time::interval(Duration::from_secs(self.config.poll_interval_seconds));

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => {
                    if !self.foreground.is_foreground() {
                        continue;
                    }
                    match self.backend.fetch(self.config.fetch_limit).await {
                        Ok(mut fetched) => {
                            fetched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                            *self.items.write().await = fetched;
                        }
                        Err(e) => tracing::debug!("Notification poll failed: {}", e),
                    }
                }
            }
        }

        tracing::debug!("Notification poll ended for '{}'", self.identity);
    }
}
