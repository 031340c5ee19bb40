//! Status message commands.

use clap::{Args, Subcommand};

use studyhub_core::error::AppError;
use studyhub_core::traits::presence::PresenceBackend;
use studyhub_core::types::StatusMessage;

use super::CommandContext;
use crate::output::print_success;

/// Status command arguments
#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(subcommand)]
    pub command: StatusCommands,
}

/// Status subcommands
#[derive(Debug, Subcommand)]
pub enum StatusCommands {
    /// Set the 24h status message
    Set {
        /// Status text
        text: String,
    },
    /// Clear the status message
    Clear,
}

/// Execute a status command
pub async fn execute(args: StatusArgs, context: &CommandContext) -> Result<(), AppError> {
    let identity = context.require_identity().await?;

    let text = match args.command {
        StatusCommands::Set { text } => text,
        StatusCommands::Clear => String::new(),
    };

    let message = StatusMessage::new(text)?;
    context.api.set_status(&identity, &message).await?;
    print_success("Status updated");
    Ok(())
}
