//! Key-value store access.
//!
//! Provides a [`KeyValueStore`] trait with two implementations:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for tests and Redis-less runs

mod memory_store;
mod redis_store;
mod service;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use service::{KeyValueStore, StoreCommand, StoreError, StoreResult};

#[cfg(test)]
pub use service::MockKeyValueStore;
