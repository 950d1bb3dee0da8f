//! Versioned envelope for state persisted across sessions.

use crate::{Cache, CacheError, KvStore};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A stored value plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persisted<T> {
    /// The user-facing state.
    pub data: T,
    /// Incremented on every save, starting at 1.
    pub version: u64,
    /// Unix timestamp (seconds) of the save.
    pub saved_at: i64,
}

impl<T> Persisted<T> {
    /// Wrap `data` stamped with the current time.
    pub fn new(data: T, version: u64) -> Self {
        Self {
            data,
            version,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl<S: KvStore> Cache<S> {
    /// Read an envelope written by [`Cache::save_persisted`].
    pub fn load_persisted<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<Persisted<T>>, CacheError> {
        self.get(key)
    }

    /// Write `data` under `key` as version `version`.
    ///
    /// Returns the timestamp recorded in the envelope.
    pub fn save_persisted<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        version: u64,
    ) -> Result<i64, CacheError> {
        let envelope = Persisted::new(data, version);
        self.set(key, &envelope)?;
        Ok(envelope.saved_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_save_and_load_envelope() {
        let cache = Cache::new(MemoryStore::new());
        let saved_at = cache.save_persisted("persist:cart", &vec![1u64, 2, 3], 4).unwrap();

        let loaded: Persisted<Vec<u64>> = cache.load_persisted("persist:cart").unwrap().unwrap();
        assert_eq!(loaded.data, vec![1, 2, 3]);
        assert_eq!(loaded.version, 4);
        assert_eq!(loaded.saved_at, saved_at);
    }

    #[test]
    fn test_load_missing_envelope() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Persisted<Vec<u64>>> = cache.load_persisted("persist:cart").unwrap();
        assert!(loaded.is_none());
    }
}
