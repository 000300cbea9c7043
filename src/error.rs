// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Two levels:
// - Page level (FetchError, ExtractError, wrapped by PageError): one page
//   failed. Below the root these are logged and swallowed.
// - Session level (CrawlError): what `Crawler::crawl` returns to its caller.
//   Only a root failure, a bad base URL or the session deadline end up here.
// =============================================================================

use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

/// A page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, DNS, TLS or body decoding failure reported by the HTTP client
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The response was not an HTML document
    #[error("unsupported content type: {content_type}")]
    UnsupportedContent { content_type: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A fetched page could not be turned into items or links.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: &'static str, reason: String },

    #[error("{0}")]
    Malformed(String),
}

/// Why a single crawl task stopped without finishing its page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// The shared fetch slots were closed while this task was waiting
    #[error("crawler is shutting down")]
    Closed,
}

/// Session-level failure returned by `Crawler::crawl`.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid crawl configuration: {0}")]
    Config(#[from] ConfigError),

    /// The base page itself could not be fetched or extracted
    #[error("could not crawl {url}: {source}")]
    RootFailed {
        url: String,
        #[source]
        source: PageError,
    },

    #[error("crawl of {url} did not finish within {after:?}")]
    Timeout { url: String, after: Duration },

    /// The root task panicked or was aborted from outside
    #[error("crawl task for {url} failed: {reason}")]
    TaskFailed { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_failure_message_includes_cause() {
        let err = CrawlError::RootFailed {
            url: "https://example.com/".to_string(),
            source: PageError::Fetch(FetchError::Status { status: 503 }),
        };
        assert_eq!(
            err.to_string(),
            "could not crawl https://example.com/: fetch failed: HTTP 503"
        );
    }

    #[test]
    fn test_page_error_from_extract_error() {
        let err: PageError = ExtractError::Malformed("no body".to_string()).into();
        assert!(matches!(err, PageError::Extract(_)));
    }
}
