//! SessionPersistence - Reads and writes the session record under one key.

use std::sync::Arc;

use crate::adapters::storage::FileKeyValueStore;
use crate::config::StorageConfig;
use crate::domain::diagnostic::{DiagnosticError, SessionSnapshot};
use crate::ports::{KeyValueStore, KeyValueStoreError};

/// Key the session record lives under unless configured otherwise.
pub const DEFAULT_SESSION_KEY: &str = "diagnostic_session";

/// Wraps a key-value store with the session record's format.
#[derive(Clone)]
pub struct SessionPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    /// File-backed persistence under `data_dir`, honouring the configured
    /// key and quota.
    pub fn from_config(config: &StorageConfig) -> Self {
        let store = FileKeyValueStore::new(&config.data_dir).with_quota(config.quota_bytes);
        Self::new(Arc::new(store)).with_key(config.session_key.clone())
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes `snapshot` as JSON in a single `set`. No retry.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if the store cannot be reached
    /// - `StorageQuota` if the store refuses the write
    pub async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), DiagnosticError> {
        let json = serde_json::to_string(snapshot).map_err(|e| DiagnosticError::StorageQuota {
            reason: format!("could not serialize session: {}", e),
        })?;

        self.store
            .set(&self.key, &json)
            .await
            .map_err(write_error)?;

        tracing::info!(key = %self.key, bytes = json.len(), "Session saved");
        Ok(())
    }

    /// Reads the record back. Absent and unparseable records both give `None`.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if the store cannot be read
    pub async fn load(&self) -> Result<Option<SessionSnapshot>, DiagnosticError> {
        let raw = self
            .store
            .get(&self.key)
            .await
            .map_err(|e| DiagnosticError::storage_unavailable(e.to_string()))?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring corrupted session record");
                Ok(None)
            }
        }
    }

    /// Deletes the record.
    pub async fn clear(&self) -> Result<(), DiagnosticError> {
        self.store
            .remove(&self.key)
            .await
            .map_err(|e| DiagnosticError::storage_unavailable(e.to_string()))
    }
}

fn write_error(err: KeyValueStoreError) -> DiagnosticError {
    match err {
        KeyValueStoreError::Unavailable(reason) => DiagnosticError::storage_unavailable(reason),
        other => DiagnosticError::StorageQuota {
            reason: other.to_string(),
        },
    }
}
