//! Validation of URLs accepted by the page cache.

use url::Url;

/// Errors that can occur during page URL validation.
#[derive(Debug, thiserror::Error)]
pub enum PageUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `raw` is an absolute HTTP(S) URL with a host.
///
/// The URL is not rewritten: the page cache keys entries by the exact string
/// the caller supplied, so `http://x` and `http://x/` count separately.
///
/// # Errors
///
/// Returns [`PageUrlError::InvalidFormat`] for unparsable input,
/// [`PageUrlError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`PageUrlError::MissingHost`] when no host is present.
pub fn validate_page_url(raw: &str) -> Result<Url, PageUrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| PageUrlError::InvalidFormat(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(PageUrlError::UnsupportedProtocol);
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(PageUrlError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_page_url("http://example.com").is_ok());
        assert!(validate_page_url("https://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            validate_page_url("ftp://example.com"),
            Err(PageUrlError::UnsupportedProtocol)
        ));
        assert!(matches!(
            validate_page_url("javascript:alert(1)"),
            Err(PageUrlError::UnsupportedProtocol)
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            validate_page_url("not a url"),
            Err(PageUrlError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_page_url(""),
            Err(PageUrlError::InvalidFormat(_))
        ));
    }
}
