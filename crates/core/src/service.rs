//! Photo query service: cache-first reads with mock fallback.
//!
//! Every read goes through the same decision tree:
//!
//! 1. Fresh cache entry under the operation's key -> return it.
//! 2. Otherwise ask the configured [`PhotoSource`]. A successful answer is
//!    written back under the key (this includes [`crate::mock::MockPhotoSource`]
//!    in development mode: whatever the configured source returns is treated
//!    as that source's data).
//! 3. If the source fails, list operations return synthetic photos from
//!    [`crate::mock`] and do NOT cache them, so the next call retries the
//!    source instead of serving mock data for a whole TTL window.
//!
//! Detail lookups bypass the cache and surface failures as
//! [`CoreError::NotFound`]; there is no synthetic stand-in for a specific id.
//!
//! Concurrent misses on the same key are coalesced: the first caller runs the
//! fetch and every caller that joined while it ran receives the same outcome,
//! success or failure. A failing provider therefore costs one upstream
//! timeout per round, however many callers are waiting.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::OnceCell;

use crate::cache::keys::{random_key, search_key, topic_key};
use crate::cache::{is_fresh, CachedValue, Cacheable, ResponseCache, PHOTO_CACHE_TTL};
use crate::error::CoreError;
use crate::mock::{mock_page, mock_photos};
use crate::photo::{normalize_query, Photo, PhotoPage};
use crate::source::{PhotoSource, SourceError};

/// Entry point for all photo read operations.
pub struct PhotoService {
    source: Arc<dyn PhotoSource>,
    cache: Arc<ResponseCache>,
    ttl: Duration,
    in_flight: Mutex<HashMap<String, Arc<Flight>>>,
}

/// Outcome of one coalesced fetch, shared by every caller of that round.
type Flight = OnceCell<Result<CachedValue, SourceError>>;

impl PhotoService {
    /// Create a service with the standard 5-minute TTL.
    pub fn new(source: Arc<dyn PhotoSource>, cache: Arc<ResponseCache>) -> Self {
        Self::with_ttl(source, cache, PHOTO_CACHE_TTL)
    }

    pub fn with_ttl(source: Arc<dyn PhotoSource>, cache: Arc<ResponseCache>, ttl: Duration) -> Self {
        Self {
            source,
            cache,
            ttl,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Name of the configured source (`"unsplash"`, `"mock"`, ...).
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // -----------------------------------------------------------------------
    // Read operations
    // -----------------------------------------------------------------------

    /// `count` random photos, optionally constrained by a search query.
    ///
    /// With a query the provider's search endpoint is used (first page,
    /// `count` results); without one, its random endpoint. Never fails.
    pub async fn random_photos(&self, count: u32, query: Option<&str>) -> Vec<Photo> {
        let query = normalize_query(query);
        let key = random_key(count, query);
        let source = &self.source;

        let fetched = self
            .cached_or_fetch(&key, || async move {
                match query {
                    Some(q) => source
                        .search_photos(q, 1, count)
                        .await
                        .map(|page| page.results),
                    None => source.random_photos(count).await,
                }
            })
            .await;

        fetched.unwrap_or_else(|e| {
            tracing::warn!(
                key = %key,
                source = self.source.name(),
                error = %e,
                "Random photo fetch failed, serving mock photos",
            );
            mock_photos(count as usize)
        })
    }

    /// One page of search results. Never fails.
    ///
    /// On upstream failure the result is a single degraded page of
    /// `per_page` mock photos (`total = per_page`, `total_pages = 1`).
    pub async fn search_photos(&self, query: &str, page: u32, per_page: u32) -> PhotoPage {
        let key = search_key(query, page, per_page);
        self.paged(key, query, page, per_page).await
    }

    /// One page of photos for a topic. Same contract as [`Self::search_photos`],
    /// with the topic used as the search term.
    pub async fn photos_by_topic(&self, topic: &str, page: u32, per_page: u32) -> PhotoPage {
        let key = topic_key(topic, page, per_page);
        self.paged(key, topic, page, per_page).await
    }

    /// A single photo by id. Not cached.
    ///
    /// Any source failure, not-found included, is reported as
    /// [`CoreError::NotFound`].
    pub async fn photo_by_id(&self, id: &str) -> Result<Photo, CoreError> {
        self.source.photo(id).await.map_err(|e| {
            if e.is_not_found() {
                tracing::debug!(photo_id = %id, "Photo not found upstream");
            } else {
                tracing::warn!(photo_id = %id, error = %e, "Photo detail fetch failed");
            }
            CoreError::NotFound {
                entity: "Photo",
                id: id.to_string(),
            }
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn paged(&self, key: String, term: &str, page: u32, per_page: u32) -> PhotoPage {
        let source = &self.source;

        let fetched = self
            .cached_or_fetch(&key, || async move {
                source.search_photos(term, page, per_page).await
            })
            .await;

        fetched.unwrap_or_else(|e| {
            tracing::warn!(
                key = %key,
                source = self.source.name(),
                error = %e,
                "Paged photo fetch failed, serving mock page",
            );
            mock_page(per_page)
        })
    }

    /// Return the fresh cached value for `key`, or run `fetch` and cache its
    /// successful result. Failed fetches are returned without touching the
    /// cache.
    async fn cached_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T, SourceError>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        if let Some(hit) = self.fresh::<T>(key).await {
            return Ok(hit);
        }

        let round = self.join_flight(key);
        let outcome = round
            .flight
            .get_or_init(|| async {
                // A previous round may have filled the entry just before this one began.
                if let Some(hit) = self.fresh::<T>(key).await {
                    return Ok(hit.into_cached());
                }

                tracing::debug!(key = %key, source = self.source.name(), "Photo cache miss");
                let fetched = fetch().await.map(Cacheable::into_cached);
                if let Ok(value) = &fetched {
                    self.cache.put(key, value.clone()).await;
                }
                fetched
            })
            .await
            .clone();

        outcome.and_then(|value| {
            T::from_cached(&value).ok_or_else(|| {
                SourceError::Decode(format!("cached value under {key} has an unexpected shape"))
            })
        })
    }

    async fn fresh<T: Cacheable>(&self, key: &str) -> Option<T> {
        let entry = self.cache.get(key).await?;
        if !is_fresh(entry.stored_at, self.ttl) {
            return None;
        }
        let value = T::from_cached(&entry.value);
        if value.is_some() {
            tracing::debug!(key = %key, "Photo cache hit");
        }
        value
    }

    /// Join the round in flight for `key`, or open a new one.
    fn join_flight<'a>(&'a self, key: &'a str) -> FlightGuard<'a> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let flight = Arc::clone(in_flight.entry(key.to_string()).or_default());
        FlightGuard {
            in_flight: &self.in_flight,
            key,
            flight,
        }
    }
}

/// A caller's membership in a fetch round.
///
/// Dropping it, on completion or cancellation, retires the round from the
/// in-flight map once it has an outcome or nobody else is waiting on it. A
/// cancelled leader with waiters left behind leaves the round open so one of
/// them can run the fetch instead.
struct FlightGuard<'a> {
    in_flight: &'a Mutex<HashMap<String, Arc<Flight>>>,
    key: &'a str,
    flight: Arc<Flight>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let current = in_flight
            .get(self.key)
            .is_some_and(|f| Arc::ptr_eq(f, &self.flight));
        // One reference in the map plus ours: nobody else is waiting.
        let abandoned = Arc::strong_count(&self.flight) <= 2;
        if current && (self.flight.initialized() || abandoned) {
            in_flight.remove(self.key);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
