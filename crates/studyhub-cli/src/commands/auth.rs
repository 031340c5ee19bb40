//! Login and signup commands.

use clap::{Args, Subcommand};
use dialoguer::Password;

use studyhub_core::error::AppError;
use studyhub_core::traits::auth::AuthBackend;
use studyhub_core::traits::store::StateStore;
use studyhub_store::keys;

use super::CommandContext;
use crate::output::print_success;

/// Auth command arguments
#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in and persist the identity locally
    Login {
        /// Username
        username: String,
    },
    /// Create a new account
    Signup {
        /// Username
        username: String,
    },
}

/// Execute an auth command
pub async fn execute(args: AuthArgs, context: &CommandContext) -> Result<(), AppError> {
    match args.command {
        AuthCommands::Login { username } => {
            let password = prompt_password("Password")?;
            let identity = context.api.login(&username, &password).await?;
            context
                .store
                .set_json(&keys::identity(), &identity)
                .await?;
            print_success(&format!("Logged in as '{}'", identity));
            Ok(())
        }
        AuthCommands::Signup { username } => {
            let password = prompt_password("Choose a password")?;
            context.api.signup(&username, &password).await?;
            print_success("Account created. You can now log in.");
            Ok(())
        }
    }
}

fn prompt_password(prompt: &str) -> Result<String, AppError> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))
}
