//! Time-bounded response cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// How a lookup was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Stale,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
            Self::Stale => write!(f, "STALE"),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedBody {
    body: Arc<[u8]>,
    fetched_at: Instant,
    ttl: Duration,
}

impl CachedBody {
    fn is_fresh_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < self.ttl
    }
}

/// Response bodies keyed by request URL.
///
/// Clones share entries.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: Arc<Mutex<HashMap<String, CachedBody>>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `url`, returning the body only while it is fresh.
    pub fn get(&self, url: &str) -> (CacheStatus, Option<Arc<[u8]>>) {
        self.get_at(url, Instant::now())
    }

    pub(crate) fn get_at(&self, url: &str, now: Instant) -> (CacheStatus, Option<Arc<[u8]>>) {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(url) {
            Some(entry) if entry.is_fresh_at(now) => (CacheStatus::Hit, Some(Arc::clone(&entry.body))),
            Some(_) => (CacheStatus::Stale, None),
            None => (CacheStatus::Miss, None),
        }
    }

    /// Store `body` for `url` for `ttl`. A zero `ttl` stores nothing.
    pub fn insert(&self, url: &str, body: Arc<[u8]>, ttl: Duration) {
        self.insert_at(url, body, ttl, Instant::now());
    }

    pub(crate) fn insert_at(&self, url: &str, body: Arc<[u8]>, ttl: Duration, now: Instant) {
        if ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            url.to_string(),
            CachedBody {
                body,
                fetched_at: now,
                ttl,
            },
        );
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(s: &str) -> Arc<[u8]> {
        Arc::from(s.as_bytes())
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = ResponseCache::new();
        let t0 = Instant::now();
        cache.insert_at("u", body("[]"), Duration::from_secs(60), t0);

        let (status, hit) = cache.get_at("u", t0 + Duration::from_secs(59));
        assert_eq!(status, CacheStatus::Hit);
        assert_eq!(hit.as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn test_stale_after_ttl() {
        let cache = ResponseCache::new();
        let t0 = Instant::now();
        cache.insert_at("u", body("[]"), Duration::from_secs(60), t0);

        let (status, hit) = cache.get_at("u", t0 + Duration::from_secs(60));
        assert_eq!(status, CacheStatus::Stale);
        assert!(hit.is_none());
    }

    #[test]
    fn test_miss_and_zero_ttl() {
        let cache = ResponseCache::new();
        assert_eq!(cache.get("u").0, CacheStatus::Miss);

        cache.insert("u", body("[]"), Duration::ZERO);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = ResponseCache::new();
        let other = cache.clone();
        other.insert("u", body("1"), Duration::from_secs(5));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(other.is_empty());
    }
}
