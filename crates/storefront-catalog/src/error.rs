//! Catalog error types.

use storefront_data::FetchError;
use thiserror::Error;

/// Errors returned by [`crate::CatalogClient`].
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] FetchError),

    /// The API answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The body was not the expected JSON.
    #[error("Failed to decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// An empty category name.
    #[error("Invalid category: {0:?}")]
    InvalidCategory(String),

    /// The base URL cannot have path segments appended.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl CatalogError {
    /// HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Http { status, .. } => Some(*status),
            CatalogError::Transport(FetchError::HttpError { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
