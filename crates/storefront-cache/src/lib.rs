//! Type-safe key-value storage for storefront client state.
//!
//! Provides a small storage seam ([`KvStore`]) with a file-backed and an
//! in-memory backend, and a [`Cache`] wrapper that adds automatic JSON
//! serialization on top of any backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open("/home/me/.local/share/storefront")?);
//!
//! // Store a value
//! cache.set("persist:cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<CartState> = cache.get("persist:cart")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;
mod persisted;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;
pub use persisted::Persisted;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore, Persisted};
}
