//! Outbound HTTP for the page cache.
//!
//! - [`PageFetcher`] - The fetch seam consumed by [`crate::application::services::FetchCache`]
//! - [`HttpFetcher`] - Production implementation on `reqwest`

mod http_fetcher;
mod service;

pub use http_fetcher::HttpFetcher;
pub use service::{FetchError, FetchResult, PageFetcher};

#[cfg(test)]
pub use service::MockPageFetcher;
