//! Local storage error types

use thiserror::Error;

/// Errors that can occur while reading or writing local state
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized or parsed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage file exists but is not a JSON object of strings
    #[error("Corrupt storage file: {0}")]
    Corruption(String),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
