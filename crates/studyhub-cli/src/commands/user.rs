//! Identity management commands: rename and leave.

use clap::{Args, Subcommand};

use studyhub_core::error::AppError;
use studyhub_core::traits::presence::PresenceBackend;
use studyhub_core::traits::store::StateStore;
use studyhub_core::types::Identity;
use studyhub_store::keys;

use super::CommandContext;
use crate::output::{print_error, print_success};

/// User command arguments
#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Change the display name
    Rename {
        /// New username
        new_username: String,
    },
    /// Send a departure notice and clear the local identity
    Leave,
}

/// Execute a user command
pub async fn execute(args: UserArgs, context: &CommandContext) -> Result<(), AppError> {
    let identity = context.require_identity().await?;

    match args.command {
        UserCommands::Rename { new_username } => {
            let new = Identity::new(new_username)?;
            if context.api.rename(&identity, &new).await? {
                context.store.set_json(&keys::identity(), &new).await?;
                print_success(&format!("Renamed '{}' to '{}'", identity, new));
            } else {
                print_error("Rename rejected (name may already be taken)");
            }
            Ok(())
        }
        UserCommands::Leave => {
            if let Err(e) = context.api.leave(&identity).await {
                // Best-effort: the remote heartbeat timeout covers it.
                tracing::debug!("Departure notice failed: {}", e);
            }
            context.store.delete(&keys::identity()).await?;
            context.store.delete(&keys::studying()).await?;
            print_success("Left and cleared local identity");
            Ok(())
        }
    }
}
