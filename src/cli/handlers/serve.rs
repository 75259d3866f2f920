//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use anyhow::Context;

use crate::config::settings::Settings;
use crate::server::Server;
use crate::state::AppState;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the serve command with optional dry-run support
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Schema compilation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()
        } else {
            Server::new(self.config).run().await
        }
    }

    /// Validate everything the server needs at startup without binding.
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config
            .validate()
            .context("Configuration is invalid")?;
        println!("✓ Configuration is valid");

        self.config
            .logger
            .to_logger_config()
            .context("Logger configuration is invalid")?;
        println!("✓ Logger configuration is valid (level: {})", self.config.logger.level);

        AppState::new().context("Request schemas failed to compile")?;
        println!("✓ Request schemas compiled");

        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Swagger UI: {}",
            if self.config.server.swagger_ui { "enabled" } else { "disabled" }
        );

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}
