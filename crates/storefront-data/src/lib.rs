//! HTTP client utilities for the storefront.
//!
//! Provides a small builder API over a pluggable [`Transport`] with automatic
//! JSON handling. The default transport is backed by `reqwest`.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::FetchClient;
//! use std::time::Duration;
//!
//! let client = FetchClient::new(Duration::from_secs(10))?
//!     .with_base_url("https://fakestoreapi.com");
//!
//! let categories: Vec<String> = client
//!     .get("/products/categories")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client backed by `reqwest` with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(timeout)?)))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: BTreeMap::new(),
            transport,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::debug!(
            method = self.builder.method.as_str(),
            url = %self.builder.url,
            "sending request"
        );
        let response = self.transport.execute(self.builder).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, Transport};
}
