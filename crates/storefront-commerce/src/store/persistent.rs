//! Shared rehydrate/mutate/save machinery.

use crate::error::CommerceError;
use serde::{de::DeserializeOwned, Serialize};
use storefront_cache::{Cache, CacheError, KvStore};

/// Result of writing state after a mutation.
///
/// A failed save leaves the in-memory state updated; the caller decides how
/// to surface the warning.
#[derive(Debug)]
#[must_use]
pub enum SaveStatus {
    /// The state was written as this version.
    Saved { version: u64 },
    /// The write failed.
    Failed(CacheError),
}

impl SaveStatus {
    /// Whether the write succeeded.
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved { .. })
    }

    /// The write error, if any.
    pub fn warning(&self) -> Option<&CacheError> {
        match self {
            SaveStatus::Saved { .. } => None,
            SaveStatus::Failed(e) => Some(e),
        }
    }
}

/// What a store mutation did and whether it was persisted.
#[derive(Debug)]
#[must_use]
pub struct Mutation<T> {
    /// Operation-specific outcome.
    pub outcome: T,
    /// Persistence result.
    pub save: SaveStatus,
}

/// State of type `T` bound to one storage key.
#[derive(Debug)]
pub(crate) struct Persistent<T, S> {
    key: &'static str,
    cache: Cache<S>,
    state: T,
    version: u64,
    saved_at: Option<i64>,
}

impl<T, S> Persistent<T, S>
where
    T: Serialize + DeserializeOwned + Default,
    S: KvStore,
{
    /// Rehydrate `key` from `store`.
    ///
    /// A missing key starts empty. A value that no longer decodes is logged
    /// and replaced by empty state on the next save. Read failures are errors.
    pub(crate) fn open(store: S, key: &'static str) -> Result<Self, CommerceError> {
        let cache = Cache::new(store);
        let (state, version, saved_at) = match cache.load_persisted::<T>(key) {
            Ok(Some(envelope)) => {
                tracing::debug!(key, version = envelope.version, "rehydrated state");
                (envelope.data, envelope.version, Some(envelope.saved_at))
            }
            Ok(None) => (T::default(), 0, None),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(key, error = %e, "stored state is unreadable, starting empty");
                (T::default(), 0, None)
            }
            Err(source) => {
                return Err(CommerceError::Rehydrate {
                    key: key.to_string(),
                    source,
                })
            }
        };
        Ok(Self {
            key,
            cache,
            state,
            version,
            saved_at,
        })
    }

    pub(crate) fn state(&self) -> &T {
        &self.state
    }

    pub(crate) fn saved_at(&self) -> Option<i64> {
        self.saved_at
    }

    /// Apply `f` to the state, then persist.
    pub(crate) fn mutate<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Mutation<R> {
        let outcome = f(&mut self.state);
        let save = self.save();
        Mutation { outcome, save }
    }

    fn save(&mut self) -> SaveStatus {
        let version = self.version + 1;
        match self.cache.save_persisted(self.key, &self.state, version) {
            Ok(saved_at) => {
                tracing::debug!(key = self.key, version, "saved state");
                self.version = version;
                self.saved_at = Some(saved_at);
                SaveStatus::Saved { version }
            }
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "failed to persist state");
                SaveStatus::Failed(e)
            }
        }
    }
}
