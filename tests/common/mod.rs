#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use instrumented_cache::application::services::{
    DEFAULT_PAGE_TTL_SECONDS, FetchCache, InstrumentedCache,
};
use instrumented_cache::infrastructure::http::{FetchError, FetchResult, PageFetcher};
use instrumented_cache::infrastructure::store::{
    KeyValueStore, MemoryStore, StoreCommand, StoreError, StoreResult,
};
use instrumented_cache::state::AppState;

/// Serves `"<html>{url}</html>"` for every URL and counts network calls.
/// URLs containing `"down"` fail with status 503.
#[derive(Default)]
pub struct StubFetcher {
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if url.contains("down") {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            });
        }

        Ok(format!("<html>{}</html>", url))
    }
}

/// A store whose every operation fails as if Redis were unreachable.
pub struct UnreachableStore;

fn refused<T>() -> StoreResult<T> {
    Err(StoreError::ConnectionError("Connection refused".to_string()))
}

#[async_trait]
impl KeyValueStore for UnreachableStore {
    async fn set(&self, _key: &str, _value: &[u8]) -> StoreResult<()> {
        refused()
    }

    async fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        refused()
    }

    async fn set_ex(&self, _key: &str, _value: &[u8], _ttl_seconds: u64) -> StoreResult<()> {
        refused()
    }

    async fn incr(&self, _key: &str) -> StoreResult<i64> {
        refused()
    }

    async fn rpush(&self, _key: &str, _value: &str) -> StoreResult<i64> {
        refused()
    }

    async fn lrange(&self, _key: &str, _start: isize, _stop: isize) -> StoreResult<Vec<String>> {
        refused()
    }

    async fn exec_atomic(&self, _commands: Vec<StoreCommand>) -> StoreResult<()> {
        refused()
    }

    async fn flush_db(&self) -> StoreResult<()> {
        refused()
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn create_state_with(store: Arc<dyn KeyValueStore>, fetcher: Arc<StubFetcher>) -> AppState {
    let objects = Arc::new(InstrumentedCache::new(store.clone()));
    let pages = Arc::new(FetchCache::new(
        store.clone(),
        fetcher,
        DEFAULT_PAGE_TTL_SECONDS,
    ));

    AppState::new(objects, pages, store)
}

/// State over a fresh in-memory store. The fetcher is returned so tests can
/// count outbound requests.
pub fn create_test_state() -> (AppState, Arc<StubFetcher>) {
    let fetcher = Arc::new(StubFetcher::default());
    let state = create_state_with(Arc::new(MemoryStore::new()), fetcher.clone());

    (state, fetcher)
}

pub fn create_unreachable_state() -> AppState {
    create_state_with(Arc::new(UnreachableStore), Arc::new(StubFetcher::default()))
}
