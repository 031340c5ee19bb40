//! Roster and leaderboard command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use studyhub_core::error::AppError;
use studyhub_core::traits::presence::PresenceBackend;
use studyhub_core::types::RosterEntry;

use super::CommandContext;
use crate::output::{OutputFormat, print_list};

/// Roster command arguments
#[derive(Debug, Args)]
pub struct RosterArgs {
    /// Show only users currently online
    #[arg(long)]
    pub online_only: bool,
}

/// One leaderboard row for display
#[derive(Debug, Serialize, Tabled)]
pub struct RosterRow {
    /// Leaderboard rank
    #[tabled(rename = "#")]
    pub rank: usize,
    /// Display name
    pub username: String,
    /// Online/offline status
    pub status: String,
    /// Accumulated study minutes
    pub minutes: u64,
    /// Status message
    #[tabled(rename = "status message")]
    pub status_text: String,
}

/// Execute the roster command
pub async fn execute(
    args: RosterArgs,
    context: &CommandContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut entries = context.api.fetch_roster().await?;
    entries.sort_by(|a, b| b.total_minutes.cmp(&a.total_minutes));

    let rows: Vec<RosterRow> = entries
        .iter()
        .filter(|e| !args.online_only || e.status == studyhub_core::types::PresenceStatus::Online)
        .enumerate()
        .map(|(i, entry)| to_row(i + 1, entry))
        .collect();

    print_list(&rows, format);
    Ok(())
}

fn to_row(rank: usize, entry: &RosterEntry) -> RosterRow {
    RosterRow {
        rank,
        username: entry.username.clone(),
        status: entry.status.as_str().to_string(),
        minutes: entry.total_minutes,
        status_text: entry.status_text.clone().unwrap_or_default(),
    }
}
