//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;

/// Execute a CLI command with the given settings
///
/// Running without a subcommand behaves like `serve`.
///
/// # Errors
/// Returns errors from argument validation or the command handler
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    cli.validate().map_err(anyhow::Error::msg)?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
    }
}
