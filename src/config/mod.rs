//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLAIM_READINESS_` prefix and nested values use double underscores as separators.
//!
//! Questionnaire content is not configured here; see
//! [`DiagnosticConfig`](crate::domain::diagnostic::DiagnosticConfig).
//!
//! # Example
//!
//! ```no_run
//! use claim_readiness::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Log endpoint at {}", config.logging.endpoint_url());
//! ```

mod error;
mod features;
mod logging;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::LoggingConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Log sink the client posts completions to
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Local session storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CLAIM_READINESS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CLAIM_READINESS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CLAIM_READINESS__STORAGE__DATA_DIR=...` -> `storage.data_dir = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLAIM_READINESS")
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
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.logging.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "CLAIM_READINESS__SERVER__PORT",
        "CLAIM_READINESS__SERVER__ENVIRONMENT",
        "CLAIM_READINESS__LOGGING__BASE_URL",
        "CLAIM_READINESS__STORAGE__SESSION_KEY",
        "CLAIM_READINESS__STORAGE__QUOTA_BYTES",
        "CLAIM_READINESS__FEATURES__JSON_LOGS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.session_key, "diagnostic_session");
        assert_eq!(config.logging.endpoint, "/api/log-diagnostic");
        assert!(config.features.log_completions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLAIM_READINESS__SERVER__PORT", "3000");
        env::set_var("CLAIM_READINESS__LOGGING__BASE_URL", "https://claims.example.org");
        env::set_var("CLAIM_READINESS__STORAGE__SESSION_KEY", "alt_session");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(
            config.logging.endpoint_url(),
            "https://claims.example.org/api/log-diagnostic"
        );
        assert_eq!(config.storage.session_key, "alt_session");
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLAIM_READINESS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_validate_reports_bad_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLAIM_READINESS__STORAGE__QUOTA_BYTES", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidQuota));
    }
}
