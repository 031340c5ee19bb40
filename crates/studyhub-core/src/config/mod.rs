//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod accrual;
pub mod api;
pub mod chat;
pub mod logging;
pub mod notify;
pub mod presence;
pub mod roster;
pub mod state;

use serde::{Deserialize, Serialize};

use self::accrual::AccrualConfig;
use self::api::ApiConfig;
use self::chat::ChatConfig;
use self::logging::LoggingConfig;
use self::notify::NotificationConfig;
use self::presence::PresenceConfig;
use self::roster::RosterConfig;
use self::state::StateConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote worker API settings.
    pub api: ApiConfig,
    /// Presence heartbeat settings.
    #[serde(default)]
    pub presence: PresenceConfig,
    /// Study time accrual settings.
    #[serde(default)]
    pub accrual: AccrualConfig,
    /// Online roster polling settings.
    #[serde(default)]
    pub roster: RosterConfig,
    /// Chat polling settings.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Broadcast notification settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Local durable state settings.
    #[serde(default)]
    pub state: StateConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `STUDYHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("STUDYHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
