//! Durable key-value store port
//!
//! String-keyed persistent storage surviving app restarts. No transactions,
//! no queries; every value is serialized text. Implementations are provided
//! by the infrastructure layer.

use async_trait::async_trait;

use super::errors::StorageError;

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key in `keys`, stopping at the first failure.
    async fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}
