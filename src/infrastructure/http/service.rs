//! Page fetcher trait and error types.

use async_trait::async_trait;

/// Errors that can occur while fetching a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} timed out")]
    Timeout { url: String },

    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// HTTP client seam used by the page cache.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpFetcher`] - `reqwest` client with a request timeout
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Issues `GET url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for non-2xx responses,
    /// [`FetchError::Timeout`] when the request exceeds the client timeout, and
    /// [`FetchError::Transport`] for every other network or decoding failure.
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}
