//! Key-value store seam and typed wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// A byte-oriented key-value backend.
///
/// Writes are synchronous from the caller's point of view: once `set`
/// returns `Ok`, a subsequent `get` (in this or a later process, for durable
/// backends) observes the value.
pub trait KvStore {
    /// Read the raw bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<CartState> = cache.get("persist:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("persist:cart", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }
}
