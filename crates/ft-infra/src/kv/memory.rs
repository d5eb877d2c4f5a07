//! In-memory key-value repository
//!
//! Backs tests and ephemeral runs; contents are lost on drop.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ft_core::ports::{KeyValueStorePort, StorageError};

#[derive(Default)]
pub struct MemoryKeyValueRepository {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorePort for MemoryKeyValueRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
