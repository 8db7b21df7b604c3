//! Page fetch cache with TTL and per-URL access counting.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::error::CacheResult;
use crate::domain::entities::{decode_int, decode_str};
use crate::domain::keys::{page_cache_key, page_count_key};
use crate::infrastructure::http::PageFetcher;
use crate::infrastructure::store::KeyValueStore;

/// TTL applied to cached page bodies unless configured otherwise.
pub const DEFAULT_PAGE_TTL_SECONDS: u64 = 10;

/// Fetches pages through a [`PageFetcher`] and caches the bodies in the store.
///
/// # Request Flow
///
/// 1. Increment `count:<url>` (hits and misses both count)
/// 2. Return `cache:<url>` if present
/// 3. On miss, fetch the page and `SETEX cache:<url>` with the configured TTL
///
/// Fetch failures are returned to the caller and nothing is cached. There is
/// no invalidation: an entry leaves the cache only when its TTL expires.
pub struct FetchCache {
    store: Arc<dyn KeyValueStore>,
    fetcher: Arc<dyn PageFetcher>,
    ttl_seconds: u64,
}

impl FetchCache {
    /// Creates a page cache whose entries live for `ttl_seconds`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn PageFetcher>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            fetcher,
            ttl_seconds,
        }
    }

    /// Returns the TTL applied to cached pages.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Returns the body of `url`, from cache when possible.
    ///
    /// # Errors
    ///
    /// - [`crate::application::CacheError::StoreUnavailable`] on store errors
    /// - [`crate::application::CacheError::FetchFailure`] if the page cannot be fetched
    /// - [`crate::application::CacheError::DecodeFailure`] if a cached body is not UTF-8
    pub async fn get_page(&self, url: &str) -> CacheResult<String> {
        let count = self.store.incr(&page_count_key(url)).await?;

        let cache_key = page_cache_key(url);
        if let Some(bytes) = self.store.get(&cache_key).await? {
            debug!("Cache HIT: {} (access #{})", url, count);
            return Ok(decode_str(bytes)?);
        }

        debug!("Cache MISS: {} (access #{})", url, count);

        let body = self.fetcher.fetch(url).await.map_err(|e| {
            warn!("Fetch failed for {}: {}", url, e);
            e
        })?;

        self.store
            .set_ex(&cache_key, body.as_bytes(), self.ttl_seconds)
            .await?;

        debug!("Cache SET: {} (TTL: {}s)", url, self.ttl_seconds);

        Ok(body)
    }

    /// Returns how many times `url` has been requested (0 if never).
    pub async fn access_count(&self, url: &str) -> CacheResult<i64> {
        match self.store.get(&page_count_key(url)).await? {
            Some(bytes) => Ok(decode_int(bytes)?),
            None => Ok(0),
        }
    }
}
