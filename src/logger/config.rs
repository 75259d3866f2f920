//! Runtime configuration for the logger.
//!
//! These types are produced from the `[logger]` settings section and are
//! validated before any subscriber is installed.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use super::error::LoggerError;

/// Main logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl LoggerConfig {
    pub fn new(level: impl Into<String>, console: ConsoleConfig, file: FileConfig) -> Result<Self, LoggerError> {
        let config = Self {
            level: level.into(),
            console,
            file,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        parse_level(&self.level)?;
        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

/// Parse a level name into a tracing::Level
pub fn parse_level(level: &str) -> Result<Level, LoggerError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(LoggerError::config(format!(
            "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
            level
        ))),
    }
}

/// Console output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colors, only honored when stdout is a terminal
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
    pub rotation: RotationConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), LoggerError> {
        if !self.enabled {
            return Ok(());
        }
        if self.path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "File path cannot be empty when file output is enabled",
            ));
        }
        if self.path.file_stem().is_none() {
            return Err(LoggerError::config(format!(
                "Log file path '{}' has no file name",
                self.path.display()
            )));
        }
        self.rotation.validate()
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/beverage-api.log"),
            append: true,
            format: LogFormat::Json,
            rotation: RotationConfig::default(),
        }
    }
}

/// Log line format for the file output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::config(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File rotation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    pub strategy: RotationStrategy,
    /// Size trigger in bytes
    pub max_size: u64,
    /// Rotated files kept next to the active one
    pub max_files: usize,
    pub compress: bool,
}

impl RotationConfig {
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.max_size == 0 {
            return Err(LoggerError::config("Maximum file size must be greater than 0"));
        }
        if self.max_files == 0 {
            return Err(LoggerError::config(
                "Maximum number of files must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            strategy: RotationStrategy::Size,
            max_size: 10 * 1024 * 1024,
            max_files: 5,
            compress: false,
        }
    }
}

/// When the active log file is rotated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationStrategy {
    /// Once the file reaches `max_size`
    #[default]
    Size,
    /// At the first write of a new calendar day
    Daily,
    /// At the first write of a new hour
    Hourly,
    /// `Size` or `Daily`, whichever comes first
    Combined,
}

impl RotationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationStrategy::Size => "size",
            RotationStrategy::Daily => "daily",
            RotationStrategy::Hourly => "hourly",
            RotationStrategy::Combined => "combined",
        }
    }
}

impl FromStr for RotationStrategy {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "size" => Ok(RotationStrategy::Size),
            "daily" | "time" => Ok(RotationStrategy::Daily),
            "hourly" => Ok(RotationStrategy::Hourly),
            "combined" => Ok(RotationStrategy::Combined),
            _ => Err(LoggerError::config(format!(
                "Invalid rotation strategy '{}'. Valid strategies are: size, daily, hourly, combined",
                s
            ))),
        }
    }
}
