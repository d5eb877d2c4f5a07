//! File-based durable key-value repository
//!
//! This module provides a file-based implementation of the
//! KeyValueStorePort, persisting each key as a standalone file under a base
//! directory in the application data directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use ft_core::ports::{KeyValueStorePort, StorageError};

pub const DEFAULT_STORE_DIR: &str = "store";

pub struct FileKeyValueRepository {
    base_dir: PathBuf,
}

impl FileKeyValueRepository {
    /// Create repository rooted at a custom directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create repository under the platform data directory
    ///
    /// Returns `None` when the platform has no data directory.
    pub fn with_defaults() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join("fit360").join(DEFAULT_STORE_DIR)))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }

    async fn ensure_base_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.base_dir).await
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::read(key, err)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_base_dir()
            .await
            .map_err(|err| StorageError::write(key, err))?;

        // Write-then-rename so the target is never observed half-written.
        let target = self.path_for(key);
        let tmp = target.with_extension("tmp");
        fs::write(&tmp, value)
            .await
            .map_err(|err| StorageError::write(key, err))?;
        fs::rename(&tmp, &target)
            .await
            .map_err(|err| StorageError::write(key, err))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::remove(key, err)),
        }
    }
}
