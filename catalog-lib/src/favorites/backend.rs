//! Backing store trait and in-memory backend.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreError;

/// Key-value byte storage that favorites are persisted into.
///
/// Implementations handle raw byte storage/retrieval.
/// [`Favorites`](super::Favorites) layers typed serialization on top.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Get raw bytes for a key.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set raw bytes for a key, replacing what was there.
    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

/// Non-durable backend, for tests and sessions that should not persist.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.store.get(key).map(|value| value.clone()))
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }
}
