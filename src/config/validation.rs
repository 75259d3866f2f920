//! Configuration validation logic
//!
//! Validation runs after all configuration layers have been merged, so the
//! errors always refer to the effective value.

use crate::config::error::ConfigError;
use crate::config::settings::{ServerConfig, Settings};

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Body limit must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.body_limit == 0 {
            return Err(ConfigError::validation(
                "server.body_limit",
                "Body limit must be greater than 0 bytes.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "application.name",
                "Application name must not be empty.",
            ));
        }

        self.server.validate()?;
        self.logger.to_logger_config()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_server_rejections() {
        let cases: [(fn(&mut ServerConfig), &str); 4] = [
            (|s| s.host = "  ".to_string(), "server.host"),
            (|s| s.port = 0, "server.port"),
            (|s| s.request_timeout = 0, "server.request_timeout"),
            (|s| s.body_limit = 0, "server.body_limit"),
        ];

        for (mutate, expected) in cases {
            let mut server = ServerConfig::default();
            mutate(&mut server);
            match server.validate() {
                Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected),
                other => panic!("Expected validation error for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_logger_rejections_surface_through_settings() {
        let mut settings = Settings::default();
        settings.logger.console.enabled = false;
        assert!(settings.validate().is_err());

        settings.logger.file.enabled = true;
        settings.logger.file.rotation.max_files = 0;
        assert!(settings.validate().is_err());

        settings.logger.file.rotation.max_files = 1;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_application_name() {
        let mut settings = Settings::default();
        settings.application.name = String::new();
        assert!(settings.validate().is_err());
    }

    proptest! {
        #[test]
        fn property_nonzero_server_values_validate(
            port in 1u16..=65535u16,
            request_timeout in 1u64..100_000u64,
            body_limit in 1usize..usize::MAX,
        ) {
            let server = ServerConfig {
                port,
                request_timeout,
                body_limit,
                ..Default::default()
            };
            prop_assert!(server.validate().is_ok());
        }
    }
}
