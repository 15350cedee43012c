//! Storage error types

use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data file {path}: {source}")]
    Serialization {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Core(#[from] kith_core::Error),

    #[error("Lock error: {0}")]
    Lock(String),
}
