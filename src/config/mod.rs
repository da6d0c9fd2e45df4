//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `ANALYZER` prefix and
//! nested values are separated by a double underscore. Every value has a
//! default, so an empty environment yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use problem_analyzer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Calling {}", config.service.base_url);
//! ```

mod error;
mod logging;
mod retry;
mod service;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use retry::RetryConfig;
pub use service::ServiceConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reasoning service endpoint and identity
    #[serde(default)]
    pub service: ServiceConfig,

    /// Retry budget and timeouts
    #[serde(default)]
    pub retry: RetryConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ANALYZER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ANALYZER__SERVICE__TENANT_ID=talos` -> `service.tenant_id = "talos"`
    /// - `ANALYZER__RETRY__MAX_ATTEMPTS=5` -> `retry.max_attempts = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ANALYZER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service.validate()?;
        self.retry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "ANALYZER__SERVICE__TENANT_ID",
        "ANALYZER__SERVICE__AUTH_TOKEN",
        "ANALYZER__SERVICE__BASE_URL",
        "ANALYZER__RETRY__MAX_ATTEMPTS",
        "ANALYZER__RETRY__TIMEOUT_SECS",
        "ANALYZER__LOGGING__FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.service.tenant(), Some("talos"));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ANALYZER__SERVICE__TENANT_ID", "acme");
        env::set_var("ANALYZER__SERVICE__AUTH_TOKEN", "tok-123");
        env::set_var("ANALYZER__RETRY__MAX_ATTEMPTS", "5");
        env::set_var("ANALYZER__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.service.tenant(), Some("acme"));
        assert_eq!(
            config.service.auth_token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("tok-123")
        );
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ANALYZER__SERVICE__BASE_URL", "eoc.mu-sigma.com/api");
        let result = AppConfig::load();
        clear_env();
        assert_eq!(
            result.unwrap().validate(),
            Err(ValidationError::InvalidBaseUrl)
        );

        let config = AppConfig {
            retry: RetryConfig {
                timeout_secs: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ANALYZER__SERVICE__AUTH_TOKEN", "super-secret");
        let result = AppConfig::load();
        clear_env();

        let rendered = format!("{:?}", result.unwrap());
        assert!(!rendered.contains("super-secret"));
    }
}
