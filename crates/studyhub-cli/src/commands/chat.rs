//! Chat history and send commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use studyhub_core::error::AppError;
use studyhub_core::traits::chat::ChatBackend;

use super::CommandContext;
use crate::output::{OutputFormat, print_list, print_success};

/// Chat command arguments
#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Room to use instead of the configured one
    #[arg(long)]
    pub room: Option<String>,

    #[command(subcommand)]
    pub command: ChatCommands,
}

/// Chat subcommands
#[derive(Debug, Subcommand)]
pub enum ChatCommands {
    /// Print the room history
    History {
        /// Only show the last N messages
        #[arg(long)]
        tail: Option<usize>,
    },
    /// Send one message
    Send {
        /// Message text
        message: String,
    },
}

/// One chat line for display
#[derive(Debug, Serialize, Tabled)]
pub struct ChatRow {
    /// Sender
    pub username: String,
    /// Message text
    pub message: String,
}

/// Execute a chat command
pub async fn execute(
    args: ChatArgs,
    context: &CommandContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let room = args.room.as_deref().unwrap_or(&context.chat_room);

    match args.command {
        ChatCommands::History { tail } => {
            let messages = context.api.history(room).await?;
            let skip = tail
                .map(|n| messages.len().saturating_sub(n))
                .unwrap_or(0);
            let rows: Vec<ChatRow> = messages[skip..]
                .iter()
                .map(|m| ChatRow {
                    username: m.username.clone(),
                    message: m.message.clone(),
                })
                .collect();
            print_list(&rows, format);
            Ok(())
        }
        ChatCommands::Send { message } => {
            let identity = context.require_identity().await?;
            context.api.send(room, &identity, &message).await?;
            print_success("Sent");
            Ok(())
        }
    }
}
