//! StudyHub — virtual co-studying workspace terminal client.
//!
//! Main entry point that wires all crates together and runs until
//! interrupted: presence heartbeat, study accrual, roster polling, chat,
//! and broadcast notifications.

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

use studyhub_client::ApiClient;
use studyhub_core::config::AppConfig;
use studyhub_core::error::AppError;
use studyhub_session::{EngineConfig, SessionEngine};
use studyhub_store::StoreManager;

/// StudyHub terminal client
#[derive(Debug, Parser)]
#[command(name = "studyhub", version, about, long_about = None)]
struct Options {
    /// Configuration environment overlay to load
    #[arg(short, long, default_value = "development")]
    env: String,

    /// Join the study session immediately
    #[arg(long)]
    study: bool,
}

#[tokio::main]
async fn main() {
    let options = Options::parse();

    let config = match AppConfig::load(&options.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(false).init();
        }
    }
}

/// Main client run function
async fn run(config: AppConfig, options: Options) -> Result<(), AppError> {
    tracing::info!("Starting StudyHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Remote API client and local state ────────────────
    let api = Arc::new(ApiClient::new(&config.api)?);
    let store = StoreManager::new(&config.state)?;

    // ── Step 2: Session engine, resuming the persisted identity ──
    let engine = Arc::new(SessionEngine::new(
        Arc::clone(&api) as Arc<dyn studyhub_core::traits::presence::PresenceBackend>,
        store.clone(),
        EngineConfig::from_app(&config),
    ));

    let Some(identity) = engine.restore().await? else {
        return Err(AppError::session(
            "No identity stored. Run `studyhub-cli auth login <username>` first.",
        ));
    };
    tracing::info!("Online as '{}'", identity);

    // ── Step 3: Chat feed ────────────────────────────────────────
    let chat = studyhub_chat::ChatFeed::new(
        Arc::clone(&api) as Arc<dyn studyhub_core::traits::chat::ChatBackend>,
        config.chat.clone(),
        identity.clone(),
        engine.foreground(),
    );
    studyhub_chat::ChatFeed::start(&chat).await;

    let mut incoming = chat.subscribe();
    tokio::spawn(async move {
        while let Ok(message) = incoming.recv().await {
            println!("[chat] {}: {}", message.username, message.message);
        }
    });

    // ── Step 4: Notification feed ────────────────────────────────
    let notifications = studyhub_notify::NotificationFeed::new(
        Arc::clone(&api) as Arc<dyn studyhub_core::traits::notification::NotificationBackend>,
        config.notifications.clone(),
        store.clone(),
        identity.clone(),
        engine.foreground(),
    )
    .await?;
    studyhub_notify::NotificationFeed::start(&notifications).await;

    // ── Step 5: Resume or join the study session ─────────────────
    if options.study || engine.persisted_studying().await? {
        engine.set_studying(true).await?;
        tracing::info!("Study session joined");
    }

    // ── Step 6: Command loop until Ctrl-C or /quit ───────────────
    println!("Commands: /join /leave /status <text> /board /inbox /quit. Anything else is chat.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(|e| {
                    AppError::internal(format!("Failed to listen for shutdown: {e}"))
                })?;
                break;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if !handle_command(line.trim(), &engine, &chat, &notifications).await {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
        }
    }

    tracing::info!("Shutting down...");
    chat.stop().await;
    notifications.stop().await;
    engine.shutdown().await?;

    tracing::info!("Goodbye");
    Ok(())
}

/// Handle one input line. Returns `false` to quit.
async fn handle_command(
    line: &str,
    engine: &SessionEngine,
    chat: &studyhub_chat::ChatFeed,
    notifications: &studyhub_notify::NotificationFeed,
) -> bool {
    match line {
        "" => {}
        "/quit" => return false,
        "/join" => {
            if let Err(e) = engine.set_studying(true).await {
                tracing::warn!("Failed to join session: {}", e);
            } else {
                println!("Study session joined.");
            }
        }
        "/leave" => {
            if let Err(e) = engine.set_studying(false).await {
                tracing::warn!("Failed to leave session: {}", e);
            } else {
                println!("Study session left.");
            }
        }
        "/board" => print_summary(engine).await,
        "/inbox" => {
            let items = notifications.notifications().await;
            if items.is_empty() {
                println!("No notifications.");
            }
            for item in &items {
                let marker = if item.read { ' ' } else { '*' };
                println!("{} {}", marker, item.message);
                let _ = notifications.mark_read(&item.id).await;
            }
        }
        line if line.starts_with("/status ") => {
            let text = line.trim_start_matches("/status ").to_string();
            match studyhub_core::types::StatusMessage::new(text) {
                Ok(message) => {
                    if let Err(e) = engine.set_status(message).await {
                        tracing::warn!("Failed to set status: {}", e);
                    } else {
                        println!("Status updated.");
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        line if line.starts_with('/') => {
            println!("Unknown command: {}", line);
        }
        message => {
            chat.notify_typing().await;
            if let Err(e) = chat.send(message).await {
                println!("Send failed: {}", e);
            }
        }
    }
    true
}

/// Print a leaderboard/session summary line.
async fn print_summary(engine: &SessionEngine) {
    let board = engine.leaderboard().await;
    let online = board
        .iter()
        .filter(|e| e.status == studyhub_core::types::PresenceStatus::Online)
        .count();

    let top: Vec<String> = board
        .iter()
        .take(3)
        .map(|e| format!("{} ({}m)", e.username, e.total_minutes))
        .collect();

    if engine.is_studying().await {
        println!(
            "[studyhub] {} online · top: {} · {}m unsaved this session",
            online,
            top.join(", "),
            engine.unsaved_minutes().await
        );
    } else {
        println!("[studyhub] {} online · top: {}", online, top.join(", "));
    }
}
