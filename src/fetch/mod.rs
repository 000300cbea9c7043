// src/fetch/mod.rs
// =============================================================================
// This module turns a URL into a Page.
//
// The crawl engine never talks to the network directly. It only sees the
// PageFetcher trait, so tests can hand it an in-memory site and the binary
// hands it the reqwest-backed HttpFetcher.
//
// Submodules:
// - http: the real fetcher (reqwest)
// =============================================================================

mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// A fetched HTML page.
#[derive(Debug, Clone)]
pub struct Page {
    /// Where the body actually came from (after redirects). Relative links
    /// in the body resolve against this URL.
    pub url: Url,
    pub body: String,
}

impl Page {
    pub fn new(url: Url, body: impl Into<String>) -> Self {
        Self {
            url,
            body: body.into(),
        }
    }
}

/// Fetches pages for the crawler. Called concurrently from many tasks.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}
