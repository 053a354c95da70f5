//! In-memory response cache with a fixed time-to-live.
//!
//! Maps a cache key (see [`keys`]) to the most recently stored value and its
//! storage time. Freshness is advisory: stale entries stay in the store until
//! a later fetch overwrites them, a sweep removes them, or the optional
//! capacity bound evicts them.
//!
//! The cache is constructed explicitly and shared behind an `Arc`; it holds
//! only re-derivable upstream data, so any holder may read or overwrite any
//! key.

pub mod keys;

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::photo::{Photo, PhotoPage};
use crate::types::Timestamp;

/// Time-to-live for cached photo responses (5 minutes).
pub const PHOTO_CACHE_TTL: Duration = Duration::from_secs(300);

/// A value held by the cache.
///
/// Random-photo lookups store [`CachedValue::Photos`]; search and topic
/// lookups store [`CachedValue::Page`].
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Photos(Vec<Photo>),
    Page(PhotoPage),
}

/// A stored value together with the time it was written.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: CachedValue,
    pub stored_at: Timestamp,
}

/// Result types that can round-trip through [`CachedValue`].
///
/// Reading a key back as the wrong variant yields `None`, which callers
/// treat as a miss.
pub trait Cacheable: Clone {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<Self>;
}

impl Cacheable for Vec<Photo> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Photos(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Photos(photos) => Some(photos.clone()),
            CachedValue::Page(_) => None,
        }
    }
}

impl Cacheable for PhotoPage {
    fn into_cached(self) -> CachedValue {
        CachedValue::Page(self)
    }

    fn from_cached(value: &CachedValue) -> Option<Self> {
        match value {
            CachedValue::Page(page) => Some(page.clone()),
            CachedValue::Photos(_) => None,
        }
    }
}

/// Whether an entry stored at `stored_at` is still fresh right now.
pub fn is_fresh(stored_at: Timestamp, ttl: Duration) -> bool {
    is_fresh_at(stored_at, Utc::now(), ttl)
}

/// Whether an entry stored at `stored_at` is fresh at `now`
/// (`now - stored_at < ttl`).
///
/// An entry stamped in the future (clock skew) counts as fresh.
pub fn is_fresh_at(stored_at: Timestamp, now: Timestamp, ttl: Duration) -> bool {
    let age = now.signed_duration_since(stored_at);
    match chrono::Duration::from_std(ttl) {
        Ok(ttl) => age < ttl,
        // TTL too large to represent: nothing ever expires.
        Err(_) => true,
    }
}

/// Process-wide key -> entry store.
///
/// Unbounded by default. [`ResponseCache::bounded`] caps the number of keys;
/// inserting a new key at capacity evicts the entry with the oldest
/// `stored_at`, which is always the stalest one.
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    max_entries: Option<usize>,
}

impl ResponseCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: None,
        }
    }

    /// Create a cache holding at most `max_entries` keys (minimum 1).
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: Some(max_entries.max(1)),
        }
    }

    /// Look up the entry stored under `key`, fresh or not.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(key).cloned()
    }

    /// Store `value` under `key` with the current time, replacing any
    /// existing entry.
    pub async fn put(&self, key: impl Into<String>, value: CachedValue) {
        self.put_at(key, value, Utc::now()).await;
    }

    /// Store `value` under `key` with an explicit storage time.
    pub async fn put_at(&self, key: impl Into<String>, value: CachedValue, stored_at: Timestamp) {
        let key = key.into();
        let mut entries = self.entries.write().await;

        if let Some(max) = self.max_entries {
            if !entries.contains_key(&key) && entries.len() >= max {
                evict_oldest(&mut entries);
            }
        }

        entries.insert(key, CacheEntry { value, stored_at });
    }

    /// Remove every entry that is no longer fresh under `ttl`.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep_expired(&self, ttl: Duration) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| is_fresh_at(entry.stored_at, now, ttl));
        before - entries.len()
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

fn evict_oldest(entries: &mut HashMap<String, CacheEntry>) {
    let oldest = entries
        .iter()
        .min_by_key(|(_, entry)| entry.stored_at)
        .map(|(key, _)| key.clone());

    if let Some(key) = oldest {
        tracing::debug!(key = %key, "Photo cache at capacity, evicting oldest entry");
        entries.remove(&key);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
