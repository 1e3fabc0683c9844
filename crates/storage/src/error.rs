//! Storage error types.

use thiserror::Error;

/// Errors that can occur while reading or writing client-side storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store's lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Convenience type alias for storage results.
pub type Result<T> = std::result::Result<T, StorageError>;
