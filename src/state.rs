//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{FetchCache, InstrumentedCache};
use crate::infrastructure::store::KeyValueStore;

#[derive(Clone)]
pub struct AppState {
    pub objects: Arc<InstrumentedCache>,
    pub pages: Arc<FetchCache>,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(
        objects: Arc<InstrumentedCache>,
        pages: Arc<FetchCache>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            objects,
            pages,
            store,
        }
    }
}
