//! Chat and notification feed behavior.

use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{ScriptedBackend, identity, run_for};

use studyhub_chat::ChatFeed;
use studyhub_core::config::chat::ChatConfig;
use studyhub_core::config::notify::NotificationConfig;
use studyhub_core::traits::chat::ChatBackend;
use studyhub_core::types::Notification;
use studyhub_notify::NotificationFeed;
use studyhub_session::Foreground;
use studyhub_store::StoreManager;
use studyhub_store::memory::MemoryStateStore;

fn chat_config() -> ChatConfig {
    ChatConfig {
        room: "study-room-1".to_string(),
        history_poll_interval_ms: 2000,
        typing_poll_interval_ms: 1500,
        typing_ttl_seconds: 6,
    }
}

fn notification(id: &str, message: &str, timestamp: i64) -> Notification {
    Notification {
        id: id.to_string(),
        message: message.to_string(),
        timestamp,
        read: false,
    }
}

/// History polls pick up messages from other users and fan them out.
#[tokio::test(start_paused = true)]
async fn chat_poll_picks_up_new_messages() {
    let backend = ScriptedBackend::new();
    let feed = ChatFeed::new(
        backend.clone(),
        chat_config(),
        identity("mira"),
        Foreground::new(),
    );
    let mut incoming = feed.subscribe();
    ChatFeed::start(&feed).await;
    run_for(Duration::from_millis(1)).await;

    backend
        .send("study-room-1", &identity("kai"), "anyone on thermodynamics?")
        .await
        .unwrap();
    run_for(Duration::from_secs(2)).await;

    let messages = feed.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].username, "kai");

    let delivered = incoming.recv().await.unwrap();
    assert_eq!(delivered.message, "anyone on thermodynamics?");

    feed.stop().await;
}

/// Sending refreshes history immediately — the sender sees their own line
/// without waiting a poll interval.
#[tokio::test(start_paused = true)]
async fn chat_send_refreshes_immediately() {
    let backend = ScriptedBackend::new();
    let feed = ChatFeed::new(
        backend.clone(),
        chat_config(),
        identity("mira"),
        Foreground::new(),
    );
    ChatFeed::start(&feed).await;
    run_for(Duration::from_millis(1)).await;

    feed.send("starting a pomodoro").await.unwrap();

    let messages = feed.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].username, "mira");

    feed.stop().await;
}

/// Empty messages are rejected locally and never reach the wire.
#[tokio::test(start_paused = true)]
async fn chat_rejects_empty_messages() {
    let backend = ScriptedBackend::new();
    let feed = ChatFeed::new(
        backend.clone(),
        chat_config(),
        identity("mira"),
        Foreground::new(),
    );

    assert!(feed.send("   ").await.is_err());
    assert!(backend.history("study-room-1").await.unwrap().is_empty());
}

/// The local user is filtered out of the typing list.
#[tokio::test(start_paused = true)]
async fn typing_list_excludes_self() {
    let backend = ScriptedBackend::new();
    let feed = ChatFeed::new(
        backend.clone(),
        chat_config(),
        identity("mira"),
        Foreground::new(),
    );
    backend.set_typing(&["mira", "kai"]);
    ChatFeed::start(&feed).await;
    run_for(Duration::from_millis(1)).await;

    assert_eq!(feed.typing_users().await, vec!["kai".to_string()]);

    feed.stop().await;
}

/// Outgoing typing events are rate-limited to one per TTL window.
#[tokio::test(start_paused = true)]
async fn typing_events_are_rate_limited() {
    let backend = ScriptedBackend::new();
    let feed = ChatFeed::new(
        backend.clone(),
        chat_config(),
        identity("mira"),
        Foreground::new(),
    );

    feed.notify_typing().await;
    feed.notify_typing().await;
    assert_eq!(backend.typing_event_count(), 1);

    // Past the 6s TTL a new event goes out.
    run_for(Duration::from_secs(7)).await;
    feed.notify_typing().await;
    assert_eq!(backend.typing_event_count(), 2);
}

/// Notifications arrive newest first and read markers survive a feed
/// restart through the persisted store.
#[tokio::test(start_paused = true)]
async fn notification_read_markers_persist() {
    let backend = ScriptedBackend::new();
    let store = StoreManager::from_provider(Arc::new(MemoryStateStore::new()));
    backend.set_notifications(vec![
        notification("n1", "maintenance tonight", 1_000),
        notification("n2", "new backgrounds added", 2_000),
    ]);

    let feed = NotificationFeed::new(
        backend.clone(),
        NotificationConfig::default(),
        store.clone(),
        identity("mira"),
        Foreground::new(),
    )
    .await
    .unwrap();
    NotificationFeed::start(&feed).await;
    run_for(Duration::from_millis(1)).await;

    let items = feed.notifications().await;
    assert_eq!(items[0].id, "n2");
    assert_eq!(feed.unread_count().await, 2);

    feed.mark_read("n2").await.unwrap();
    assert_eq!(feed.unread_count().await, 1);
    feed.stop().await;

    // A new feed for the same identity sees the marker.
    let reopened = NotificationFeed::new(
        backend.clone(),
        NotificationConfig::default(),
        store,
        identity("mira"),
        Foreground::new(),
    )
    .await
    .unwrap();
    NotificationFeed::start(&reopened).await;
    run_for(Duration::from_millis(1)).await;

    assert_eq!(reopened.unread_count().await, 1);
    let items = reopened.notifications().await;
    assert!(items.iter().any(|n| n.id == "n2" && n.read));

    reopened.stop().await;
}
