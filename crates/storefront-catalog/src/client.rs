//! Typed catalog endpoints.

use crate::cache::ResponseCache;
use crate::{revalidate, CatalogError};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use storefront_commerce::catalog::Product;
use storefront_commerce::ProductId;
use storefront_data::FetchClient;
use url::Url;

/// Client for the product API.
///
/// Cheap to clone; clones share the response cache.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: Url,
    http: FetchClient,
    cache: ResponseCache,
}

impl CatalogClient {
    /// Create a client for `base_url` using the default HTTP transport.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        Self::with_fetch_client(base_url, FetchClient::new(timeout)?)
    }

    /// Create a client over an existing [`FetchClient`].
    pub fn with_fetch_client(base_url: &str, http: FetchClient) -> Result<Self, CatalogError> {
        let base_url =
            Url::parse(base_url).map_err(|e| CatalogError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = http.with_default_header("Accept", "application/json");
        Ok(Self {
            base_url,
            http,
            cache: ResponseCache::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The shared response cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// `GET /products`
    pub async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint(&["products"])?;
        self.fetch_json(url, revalidate::PRODUCTS).await
    }

    /// `GET /products/{id}`
    ///
    /// The API answers an unknown id with an empty 200 body, which maps to `None`.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let url = self.endpoint(&["products", &id.to_string()])?;
        let body = self.fetch_body(&url, revalidate::PRODUCTS).await?;
        if body.iter().all(u8::is_ascii_whitespace) || body.as_ref() == b"null" {
            tracing::debug!(%id, "product not found");
            return Ok(None);
        }
        decode(&url, &body).map(Some)
    }

    /// `GET /products/categories`
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint(&["products", "categories"])?;
        self.fetch_json(url, revalidate::CATEGORIES).await
    }

    /// `GET /products/category/{category}`
    ///
    /// Category names contain spaces and apostrophes ("men's clothing"), so
    /// the name is sent as a single encoded path segment.
    pub async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(CatalogError::InvalidCategory(category.to_string()));
        }
        let url = self.endpoint(&["products", "category", category])?;
        self.fetch_json(url, revalidate::PRODUCTS).await
    }

    /// `GET /products?limit={limit}`
    pub async fn featured_products(&self, limit: usize) -> Result<Vec<Product>, CatalogError> {
        let mut url = self.endpoint(&["products"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        self.fetch_json(url, revalidate::PRODUCTS).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url, ttl: Duration) -> Result<T, CatalogError> {
        let body = self.fetch_body(&url, ttl).await?;
        decode(&url, &body)
    }

    async fn fetch_body(&self, url: &Url, ttl: Duration) -> Result<Arc<[u8]>, CatalogError> {
        let (status, cached) = self.cache.get(url.as_str());
        if let Some(body) = cached {
            tracing::debug!(url = %url, cache = %status, "catalog cache hit");
            return Ok(body);
        }
        tracing::debug!(url = %url, cache = %status, "fetching from catalog");

        let response = self.http.get(url.as_str()).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "catalog request failed");
            CatalogError::Transport(e)
        })?;
        if !response.is_success() {
            tracing::warn!(url = %url, status = response.status, "catalog returned an error status");
            return Err(CatalogError::Http {
                status: response.status,
                url: url.to_string(),
            });
        }

        let body: Arc<[u8]> = Arc::from(response.body);
        self.cache.insert(url.as_str(), Arc::clone(&body), ttl);
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &[u8]) -> Result<T, CatalogError> {
    serde_json::from_slice(body).map_err(|source| {
        tracing::warn!(url = %url, error = %source, "catalog body did not decode");
        CatalogError::Decode {
            url: url.to_string(),
            source,
        }
    })
}
