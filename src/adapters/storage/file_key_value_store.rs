//! File-based Key-Value Store Adapter
//!
//! Stores each key as `<key>.json` under a base directory. Writes go to a
//! temporary sibling first and are renamed into place, so a reader never
//! sees a half-written value.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::DEFAULT_QUOTA_BYTES;
use crate::ports::{KeyValueStore, KeyValueStoreError};

/// File-based key-value store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
    quota_bytes: usize,
}

impl FileKeyValueStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data/diagnostic");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }

    /// Reject values larger than `quota_bytes`
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Keys become file names, so only a conservative character set is allowed.
    fn value_path(&self, key: &str) -> Result<PathBuf, KeyValueStoreError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(KeyValueStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), KeyValueStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| KeyValueStoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let path = self.value_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KeyValueStoreError::Io(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let path = self.value_path(key)?;
        if value.len() > self.quota_bytes {
            return Err(KeyValueStoreError::QuotaExceeded {
                key: key.to_string(),
                needed: value.len(),
                quota: self.quota_bytes,
            });
        }

        self.ensure_dir().await?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| KeyValueStoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| KeyValueStoreError::Io(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let path = self.value_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KeyValueStoreError::Io(e.to_string())),
        }
    }
}
