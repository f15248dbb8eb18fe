//! Log sink configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where the client posts finished-diagnostic payloads
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Endpoint path, resolved against `base_url`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Scheme and authority of the log server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl LoggingConfig {
    /// Full URL of the log endpoint
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate log sink configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.endpoint.starts_with('/') {
            return Err(ValidationError::InvalidLogUrl(self.endpoint.clone()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidLogUrl(self.base_url.clone()));
        }
        if self.timeout_ms == 0 || self.timeout_ms > 60_000 {
            return Err(ValidationError::InvalidLogTimeout);
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "/api/log-diagnostic".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_without_double_slash() {
        let config = LoggingConfig {
            base_url: "https://claims.example.org/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint_url(),
            "https://claims.example.org/api/log-diagnostic"
        );
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let config = LoggingConfig {
            base_url: "localhost:8080".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogUrl(_))
        ));
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.timeout_ms = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidLogTimeout));

        config.timeout_ms = 60_001;
        assert_eq!(config.validate(), Err(ValidationError::InvalidLogTimeout));
    }
}
