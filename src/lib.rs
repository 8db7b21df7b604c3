//! # Instrumented Cache
//!
//! A Redis-backed object cache that records how it is used, plus a
//! short-lived page-fetch cache, served over an Axum HTTP API.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Stored values, replay records, and key layout
//! - **Application Layer** ([`application`]) - Cache services and call instrumentation
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value store and HTTP fetching
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Values stored under random UUID keys with typed read-back
//! - Per-operation call counter and input/output history in the store
//! - Replay of recorded calls
//! - Page fetches cached with a TTL and per-URL access counts
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//!
//! # Start the service
//! cargo run
//!
//! # Or run the CLI against the same store
//! cargo run --bin cachectl -- demo
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::CacheError;
    pub use crate::application::services::{FetchCache, InstrumentedCache};
    pub use crate::domain::entities::{Replay, StoredValue};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{KeyValueStore, MemoryStore, RedisStore};
    pub use crate::state::AppState;
}
