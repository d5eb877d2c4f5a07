//! Port error types.

use thiserror::Error;

/// Durable key-value store failure.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage read failed for key {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("storage write failed for key {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("storage remove failed for key {key}: {reason}")]
    Remove { key: String, reason: String },
}

impl StorageError {
    pub fn read(key: &str, reason: impl ToString) -> Self {
        Self::Read {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write(key: &str, reason: impl ToString) -> Self {
        Self::Write {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn remove(key: &str, reason: impl ToString) -> Self {
        Self::Remove {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
