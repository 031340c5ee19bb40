//! Shared community timer commands.

use chrono::Utc;
use clap::{Args, Subcommand};

use studyhub_core::error::AppError;

use super::CommandContext;
use crate::output::{print_kv, print_success};

/// Timer command arguments
#[derive(Debug, Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    pub command: TimerCommands,
}

/// Timer subcommands
#[derive(Debug, Subcommand)]
pub enum TimerCommands {
    /// Show the timer start and elapsed time
    Show,
    /// Reset the timer for everyone
    Reset,
}

/// Execute a timer command
pub async fn execute(args: TimerArgs, context: &CommandContext) -> Result<(), AppError> {
    match args.command {
        TimerCommands::Show => {
            let timer = context.api.timer_status().await?;
            let elapsed = timer.elapsed_seconds(Utc::now());
            print_kv("start (unix ms)", &timer.start_time_ms.to_string());
            print_kv(
                "elapsed",
                &format!(
                    "{:02}:{:02}:{:02}",
                    elapsed / 3600,
                    (elapsed % 3600) / 60,
                    elapsed % 60
                ),
            );
            Ok(())
        }
        TimerCommands::Reset => {
            context.api.timer_reset().await?;
            print_success("Community timer reset");
            Ok(())
        }
    }
}
