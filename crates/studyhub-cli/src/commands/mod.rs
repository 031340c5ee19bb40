//! CLI command definitions and dispatch.

pub mod auth;
pub mod chat;
pub mod roster;
pub mod status;
pub mod timer;
pub mod user;

use clap::{Parser, Subcommand};

use studyhub_client::ApiClient;
use studyhub_core::config::AppConfig;
use studyhub_core::error::AppError;
use studyhub_core::traits::store::StateStore;
use studyhub_core::types::Identity;
use studyhub_store::{StoreManager, keys};

use crate::output::OutputFormat;

/// StudyHub — virtual co-studying workspace client
#[derive(Debug, Parser)]
#[command(name = "studyhub-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay to load
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Account login and signup
    Auth(auth::AuthArgs),
    /// Online roster and leaderboard
    Roster(roster::RosterArgs),
    /// 24h status message
    Status(status::StatusArgs),
    /// Identity management (rename, leave)
    User(user::UserArgs),
    /// Study room chat
    Chat(chat::ChatArgs),
    /// Shared community timer
    Timer(timer::TimerArgs),
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        let context = CommandContext::new(&config)?;

        match self.command {
            Commands::Auth(args) => auth::execute(args, &context).await,
            Commands::Roster(args) => roster::execute(args, &context, self.format).await,
            Commands::Status(args) => status::execute(args, &context).await,
            Commands::User(args) => user::execute(args, &context).await,
            Commands::Chat(args) => chat::execute(args, &context, self.format).await,
            Commands::Timer(args) => timer::execute(args, &context).await,
        }
    }
}

/// Shared wiring for every command: the API client and the local store.
#[derive(Debug)]
pub struct CommandContext {
    /// Remote API client.
    pub api: ApiClient,
    /// Local durable state.
    pub store: StoreManager,
    /// Chat room from configuration.
    pub chat_room: String,
}

impl CommandContext {
    fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            api: ApiClient::new(&config.api)?,
            store: StoreManager::new(&config.state)?,
            chat_room: config.chat.room.clone(),
        })
    }

    /// The persisted identity, or an error telling the user to log in.
    pub async fn require_identity(&self) -> Result<Identity, AppError> {
        self.store
            .get_json(&keys::identity())
            .await?
            .ok_or_else(|| AppError::session("No identity stored. Run `studyhub-cli auth login` first."))
    }
}
