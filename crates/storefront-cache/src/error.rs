//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store at {path}: {source}")]
    OpenError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform a store operation.
    #[error("Store operation failed: {0}")]
    StoreError(#[from] std::io::Error),

    /// Key cannot be mapped onto the backend.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}
