//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Applies command line overrides on top of file and environment configuration.
///
/// Precedence, lowest to highest: built-in defaults, configuration files,
/// `BEVERAGE_*` environment variables, global flags, subcommand flags.
#[derive(Debug, Clone)]
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration the way the CLI selects it.
    ///
    /// `--config` switches the loader to single-file mode and `--env`
    /// replaces `BEVERAGE_APP_ENV`. The result is not validated yet since
    /// flags may still fix invalid values.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Merge CLI arguments with the base configuration and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        apply_global_overrides(&mut config, cli);

        if let Some(command) = &cli.command {
            apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    /// Get the base configuration
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
    if cli.verbose {
        config.logger.level = "debug".to_string();
    } else if cli.quiet {
        config.logger.level = "error".to_string();
    }
}

fn apply_command_overrides(config: &mut Settings, command: &Commands) {
    match command {
        Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        } => {
            if let Some(host_addr) = host {
                config.server.host = host_addr.clone();
            }

            if let Some(port_num) = port {
                config.server.port = *port_num;
            }

            // Subcommand level beats --verbose/--quiet
            if let Some(level) = log_level {
                config.logger.level = (*level).into();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{CONFIG_DIR_ENV, CONFIG_FILE_ENV};
    use crate::config::test_env::{EnvGuard, lock};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli)
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = Settings::default();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_no_flags_keeps_base() {
        assert_eq!(merge(&["beverage-api"]).unwrap(), Settings::default());
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["beverage-api", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["beverage-api", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_host_and_port() {
        let merged = merge(&["beverage-api", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["beverage-api", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_flags_can_fix_invalid_base() {
        let mut base = Settings::default();
        base.server.port = 0;
        let merger = ConfigurationMerger::new(base);

        let cli = Cli::try_parse_from(["beverage-api"]).unwrap();
        assert!(merger.merge_cli_args(&cli).is_err());

        let cli = Cli::try_parse_from(["beverage-api", "serve", "--port", "4000"]).unwrap();
        assert_eq!(merger.merge_cli_args(&cli).unwrap().server.port, 4000);
    }

    #[test]
    fn test_from_cli_uses_config_file_and_env() {
        let _lock = lock();
        let mut env = EnvGuard::new();
        env.remove(CONFIG_FILE_ENV);
        env.remove(crate::config::Environment::ENV_VAR);
        env.remove("BEVERAGE_SERVER__PORT");

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("staging.toml"), "[server]\nport = 5100\n").unwrap();
        let single = dir.path().join("single.toml");
        fs::write(&single, "[server]\nport = 5200\n").unwrap();
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());

        let cli = Cli::try_parse_from(["beverage-api", "--env", "staging"]).unwrap();
        let merger = ConfigurationMerger::from_cli(&cli).unwrap();
        assert_eq!(merger.config().server.port, 5100);

        env.remove(CONFIG_DIR_ENV);
        let cli = Cli::try_parse_from(["beverage-api", "--config", single.to_str().unwrap()]).unwrap();
        let merger = ConfigurationMerger::from_cli(&cli).unwrap();
        assert_eq!(merger.config().server.port, 5200);
    }
}
