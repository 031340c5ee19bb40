//! Chat feed: history/typing pollers and the send path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing;

use studyhub_core::config::chat::ChatConfig;
use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;
use studyhub_core::traits::chat::ChatBackend;
use studyhub_core::types::{ChatMessage, Identity};
use studyhub_session::Foreground;

/// Capacity of the new-message fan-out channel.
const INCOMING_BUFFER: usize = 128;

#[derive(Debug)]
struct FeedLoops {
    cancel: watch::Sender<bool>,
    history: JoinHandle<()>,
    typing: JoinHandle<()>,
}

/// Polling chat feed for one room.
///
/// History polls replace the whole local message list (same shape as the
/// roster poller); messages past the previously seen length are fanned out
/// on a broadcast channel for the UI.
#[derive(Debug)]
pub struct ChatFeed {
    backend: Arc<dyn ChatBackend>,
    config: ChatConfig,
    identity: Identity,
    foreground: Foreground,
    messages: RwLock<Vec<ChatMessage>>,
    typing: RwLock<Vec<String>>,
    incoming: broadcast::Sender<ChatMessage>,
    last_typing_sent: Mutex<Option<Instant>>,
    loops: Mutex<Option<FeedLoops>>,
}

impl ChatFeed {
    /// Create a feed for the configured room.
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        config: ChatConfig,
        identity: Identity,
        foreground: Foreground,
    ) -> Arc<Self> {
        let (incoming, _) = broadcast::channel(INCOMING_BUFFER);
        Arc::new(Self {
            backend,
            config,
            identity,
            foreground,
            messages: RwLock::new(Vec::new()),
            typing: RwLock::new(Vec::new()),
            incoming,
            last_typing_sent: Mutex::new(None),
            loops: Mutex::new(None),
        })
    }

    /// Subscribe to newly arrived messages.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.incoming.subscribe()
    }

    /// Start the history and typing pollers. Both fire immediately.
    pub async fn start(feed: &Arc<Self>) {
        let mut loops = feed.loops.lock().await;
        if loops.is_some() {
            return;
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);

        let history = tokio::spawn(Arc::clone(feed).run_history_poll(cancel_rx.clone()));
        let typing = tokio::spawn(Arc::clone(feed).run_typing_poll(cancel_rx));

        *loops = Some(FeedLoops {
            cancel: cancel_tx,
            history,
            typing,
        });
        tracing::info!(room = %feed.config.room, "Chat feed started");
    }

    /// Stop the pollers.
    pub async fn stop(&self) {
        let mut loops = self.loops.lock().await;
        if let Some(loops) = loops.take() {
            let _ = loops.cancel.send(true);
            let _ = loops.history.await;
            let _ = loops.typing.await;
        }
    }

    /// The current message list, oldest first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    /// Users currently typing, excluding the local user.
    pub async fn typing_users(&self) -> Vec<String> {
        self.typing.read().await.clone()
    }

    /// Send one message and refresh history immediately so the sender sees
    /// their own line without waiting a poll interval.
    pub async fn send(&self, text: &str) -> AppResult<()> {
        if text.trim().is_empty() {
            return Err(AppError::validation("Message must not be empty"));
        }
        self.backend
            .send(&self.config.room, &self.identity, text)
            .await?;
        self.refresh_history().await;
        Ok(())
    }

    /// Record a typing indicator, rate-limited to one wire event per
    /// `typing_ttl_seconds`. Failures are swallowed; a lost indicator is
    /// cosmetic.
    pub async fn notify_typing(&self) {
        let mut last = self.last_typing_sent.lock().await;
        let ttl = Duration::from_secs(self.config.typing_ttl_seconds);
        if let Some(at) = *last {
            if at.elapsed() < ttl {
                return;
            }
        }
        *last = Some(Instant::now());
        drop(last);

        if let Err(e) = self
            .backend
            .notify_typing(&self.config.room, &self.identity)
            .await
        {
            tracing::debug!("Typing event failed: {}", e);
        }
    }

    async fn run_history_poll(self: Arc<Self>, mut cancel: watch::Receiver<bool>) {
        let mut interval =
            time::interval(Duration::from_millis(self.config.history_poll_interval_ms));

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
                    self.refresh_history().await;
                }
            }
        }

        tracing::debug!(room = %self.config.room, "Chat history poll ended");
    }

    async fn run_typing_poll(self: Arc<Self>, mut cancel: watch::Receiver<bool>) {
        let mut interval =
            time::interval(Duration::from_millis(self.config.typing_poll_interval_ms));

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
                    match self.backend.typing_users(&self.config.room).await {
                        Ok(users) => {
                            let mut typing = self.typing.write().await;
                            *typing = users
                                .into_iter()
                                .map(|u| u.username)
                                .filter(|name| name != self.identity.as_str())
                                .collect();
                        }
                        Err(e) => tracing::debug!("Typing poll failed: {}", e),
                    }
                }
            }
        }
    }

    async fn refresh_history(&self) {
        match self.backend.history(&self.config.room).await {
            Ok(fetched) => {
                let mut messages = self.messages.write().await;
                // History is append-only upstream; anything past the
                // previously seen length is new.
                if fetched.len() > messages.len() {
                    for message in &fetched[messages.len()..] {
                        let _ = self.incoming.send(message.clone());
                    }
                }
                *messages = fetched;
            }
            Err(e) => tracing::debug!("History poll failed, keeping previous messages: {}", e),
        }
    }
}
