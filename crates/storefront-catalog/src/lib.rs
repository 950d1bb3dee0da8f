//! Catalog client for the fake store product API.
//!
//! Wraps [`storefront_data::FetchClient`] with typed endpoints and an
//! in-memory response cache that honors each endpoint's revalidate window.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_catalog::CatalogClient;
//! use std::time::Duration;
//!
//! let catalog = CatalogClient::new(storefront_catalog::DEFAULT_BASE_URL, Duration::from_secs(10))?;
//! for product in catalog.featured_products(4).await? {
//!     println!("{} {}", product.title, product.price);
//! }
//! ```

mod cache;
mod client;
mod error;

pub use cache::{CacheStatus, ResponseCache};
pub use client::CatalogClient;
pub use error::CatalogError;

use std::time::Duration;

/// Public product API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV: &str = "FAKE_STORE_API_URL";

/// Number of products on the landing page.
pub const DEFAULT_FEATURED_LIMIT: usize = 4;

/// How long fetched bodies may be reused.
pub mod revalidate {
    use super::Duration;

    /// Product lists and single products.
    pub const PRODUCTS: Duration = Duration::from_secs(3600);

    /// The category list.
    pub const CATEGORIES: Duration = Duration::from_secs(86_400);
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogClient, CatalogError, DEFAULT_BASE_URL, DEFAULT_FEATURED_LIMIT};
}
