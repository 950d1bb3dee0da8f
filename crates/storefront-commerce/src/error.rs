//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// The backing store could not be read while opening a persisted store.
    #[error("Failed to rehydrate {key}: {source}")]
    Rehydrate {
        key: String,
        #[source]
        source: storefront_cache::CacheError,
    },
}
