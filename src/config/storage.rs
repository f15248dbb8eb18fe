//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the session record is kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file-backed store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key the session record is written under
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Largest value the store accepts, in bytes
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("storage.session_key"));
        }
        if self.quota_bytes == 0 {
            return Err(ValidationError::InvalidQuota);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            session_key: default_session_key(),
            quota_bytes: default_quota_bytes(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/diagnostic")
}

fn default_session_key() -> String {
    "diagnostic_session".to_string()
}

fn default_quota_bytes() -> usize {
    5 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.session_key, "diagnostic_session");
        assert_eq!(config.quota_bytes, 5 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_session_key_is_rejected() {
        let config = StorageConfig {
            session_key: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("storage.session_key"))
        );
    }

    #[test]
    fn test_zero_quota_is_rejected() {
        let config = StorageConfig {
            quota_bytes: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidQuota));
    }
}
