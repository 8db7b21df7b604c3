//! `reqwest`-backed page fetcher.

use super::service::{FetchError, FetchResult, PageFetcher};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP with an explicit per-request timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests fail with [`FetchError::Timeout`] after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the builder's error if the TLS backend cannot be initialized.
    /// This is a startup failure, not a fetch failure, so it is not mapped
    /// into [`FetchError`].
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    fn classify(url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| Self::classify(url, e))?;

        debug!(
            "GET {} -> {} ({} bytes) in {} ms",
            url,
            status,
            body.len(),
            start.elapsed().as_millis()
        );

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("instrumented-cache/"));
    }

    #[test]
    fn test_new_builds_client() {
        assert!(HttpFetcher::new(Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();

        let result = fetcher.fetch("http://127.0.0.1:1/").await;

        assert!(matches!(
            result,
            Err(FetchError::Transport { .. }) | Err(FetchError::Timeout { .. })
        ));
    }
}
