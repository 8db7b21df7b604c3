//! Key-value store trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    ConnectionError(String),

    #[error("Store operation error: {0}")]
    OperationError(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() || e.is_connection_refusal() || e.is_timeout() {
            Self::ConnectionError(e.to_string())
        } else {
            Self::OperationError(e.to_string())
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A write submitted as part of an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// `INCR key`
    Incr(String),
    /// `RPUSH key value`
    RPush { key: String, value: String },
}

/// The primitives the cache components need from an external key-value store.
///
/// Implementations must be thread-safe. Increment and list append must be
/// atomic per key; [`KeyValueStore::exec_atomic`] must apply the whole batch
/// without interleaving other writers. Whether a batch that fails part-way
/// leaves earlier commands applied is backend-specific (see
/// [`KeyValueStore::exec_atomic`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis via a connection manager
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store for tests and local runs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `SET key value` with no expiry.
    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// `GET key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` if the key exists and has not expired
    /// - `Ok(None)` otherwise
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// `SETEX key ttl value`. The key is treated as absent once `ttl_seconds` elapse.
    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> StoreResult<()>;

    /// `INCR key`, returning the new value. A missing key counts from zero.
    async fn incr(&self, key: &str) -> StoreResult<i64>;

    /// `RPUSH key value`, returning the new list length.
    async fn rpush(&self, key: &str, value: &str) -> StoreResult<i64>;

    /// `LRANGE key start stop` with Redis index semantics (negative indexes
    /// count from the end, `stop` is inclusive). A missing key is an empty list.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>>;

    /// Applies every command in order without interleaving other writers
    /// (`MULTI`/`EXEC`).
    ///
    /// # Partial failure
    ///
    /// Redis does not roll back a transaction: if one command fails at
    /// runtime (e.g. `WRONGTYPE`), the other commands of the batch are still
    /// applied and the error is returned. [`crate::infrastructure::store::MemoryStore`]
    /// checks the batch before applying it and applies nothing on error.
    /// The bookkeeping keys written through this method are only ever
    /// touched by it, so the runtime failure cannot arise from this crate's
    /// own writes.
    async fn exec_atomic(&self, commands: Vec<StoreCommand>) -> StoreResult<()>;

    /// `FLUSHDB`. Removes every key in the current database.
    async fn flush_db(&self) -> StoreResult<()>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
