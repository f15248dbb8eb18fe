//! In-Memory Key-Value Store Adapter
//!
//! Keeps values in a shared map. Can be switched to an unavailable mode or
//! given a tiny quota to exercise the failure paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::DEFAULT_QUOTA_BYTES;
use crate::ports::{KeyValueStore, KeyValueStoreError};

/// In-memory key-value store
#[derive(Debug, Clone)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: usize,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store with the default quota
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Create an empty store that rejects values larger than `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
            quota_bytes,
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail with `Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Write a value without quota checks (useful for planting corrupt data in tests)
    pub async fn put_raw(&self, key: &str, value: &str) {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Get the number of stored keys
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), KeyValueStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KeyValueStoreError::Unavailable(
                "in-memory store disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        self.check_available()?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.check_available()?;
        if value.len() > self.quota_bytes {
            return Err(KeyValueStoreError::QuotaExceeded {
                key: key.to_string(),
                needed: value.len(),
                quota: self.quota_bytes,
            });
        }
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.check_available()?;
        self.values.write().await.remove(key);
        Ok(())
    }
}
