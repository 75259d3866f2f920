//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// A small HTTP service that greets visitors and prepares beverages
#[derive(Parser, Debug)]
#[command(name = "beverage-api")]
#[command(about = "A small HTTP service that greets visitors and prepares beverages")]
#[command(long_about = "
beverage-api serves a JSON API under /api: a couple of greetings, a pet
intake endpoint and a beverage counter whose requests are validated
against JSON schemas before any handler runs.

EXAMPLES:
    # Start the server with default configuration
    beverage-api serve

    # Start server on custom host and port
    beverage-api serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    beverage-api --config /path/to/config.toml serve

    # Run in production mode with quiet logging
    beverage-api --env production --quiet serve

    # Check configuration without starting server
    beverage-api serve --dry-run
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered configuration
    /// directory. The file must exist and be readable.
    ///
    /// Example: --config /etc/beverage-api/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded, taking precedence
    /// over BEVERAGE_APP_ENV.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   beverage-api serve                            # Start with defaults
    ///   beverage-api serve --host 0.0.0.0 --port 80   # Bind to all interfaces on port 80
    ///   beverage-api serve --dry-run                  # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept
        /// connections from any interface.
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535.
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over the configuration file and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Returns exit code 0 if the configuration is valid, non-zero otherwise.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Validate argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }

    /// Whether the invocation only checks the configuration.
    pub fn is_dry_run(&self) -> bool {
        matches!(self.command, Some(Commands::Serve { dry_run: true, .. }))
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["beverage-api", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["beverage-api", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["beverage-api"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
        assert!(!cli.is_dry_run());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "beverage-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-level",
            "warning",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                host: Some("0.0.0.0".to_string()),
                port: Some(8080),
                log_level: Some(LogLevel::Warn),
                dry_run: false,
            })
        );
    }

    #[test]
    fn test_dry_run() {
        let cli = Cli::try_parse_from(["beverage-api", "serve", "--dry-run"]).unwrap();
        assert!(cli.is_dry_run());
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["beverage-api", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));

        let cli = Cli::try_parse_from(["beverage-api", "-e", "stage"]).unwrap();
        assert_eq!(
            crate::config::Environment::from(cli.env.unwrap()),
            crate::config::Environment::Staging
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = Cli::try_parse_from(["beverage-api", "serve", "--port", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["beverage-api", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_validate_rejects_manual_conflict() {
        let cli = Cli {
            command: None,
            config: None,
            env: None,
            verbose: true,
            quiet: true,
        };
        assert!(cli.validate().is_err());
    }
}
