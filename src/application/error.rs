//! Errors surfaced by the cache components.

use crate::domain::entities::DecodeError;
use crate::infrastructure::http::FetchError;
use crate::infrastructure::store::StoreError;

/// Failure of a cache component operation.
///
/// Absent keys are not errors: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The store is unreachable or rejected a command.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// A transform applied to retrieved bytes failed.
    #[error("Decode failure: {0}")]
    DecodeFailure(#[from] DecodeError),

    /// The HTTP request for a page did not succeed.
    #[error("Fetch failure: {0}")]
    FetchFailure(#[from] FetchError),
}

/// Result type for cache component operations.
pub type CacheResult<T> = Result<T, CacheError>;
