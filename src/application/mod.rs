//! Application layer services implementing the cache behavior.
//!
//! Services consume the store and fetcher traits from the infrastructure
//! layer and provide a clean API for HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::InstrumentedCache`] - Object storage with call counting and history
//! - [`services::FetchCache`] - Page fetching with TTL caching and access counting
//! - [`services::Instrumented`] - Interceptor runner shared by instrumented operations

pub mod error;
pub mod services;

pub use error::{CacheError, CacheResult};
