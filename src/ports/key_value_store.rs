//! Key-Value Store Port - Durable local storage for the session record.
//!
//! One value per key, replaced wholesale on write. Implementations do no
//! locking beyond what a single `set` needs to be atomic.

use async_trait::async_trait;

/// Errors that can occur during key-value store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyValueStoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Quota exceeded writing {key}: {needed} bytes, {quota} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for a string-valued key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, `None` if the key was never written.
    ///
    /// # Errors
    /// `Unavailable` if the store cannot be reached at all
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Replaces the value under `key`.
    ///
    /// # Errors
    /// `QuotaExceeded` if the value does not fit, `Unavailable` or `Io` otherwise
    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Deletes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}
