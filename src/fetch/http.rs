// src/fetch/http.rs
// =============================================================================
// The reqwest-backed PageFetcher.
//
// Key functionality:
// - One shared Client (connection pooling) with timeout, redirect limit and
//   a user agent taken from CrawlConfig
// - Non-2xx responses become FetchError::Status
// - Responses that are not HTML are refused, there is nothing to extract
//   from a PDF or a JPEG
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client};
use tracing::trace;

use super::{Page, PageFetcher};
use crate::config::CrawlConfig;
use crate::error::FetchError;

/// Redirect hops followed before giving up on a page
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            timeout: config.fetch_timeout,
        })
    }

    // Timeouts get their own variant so they read the same whether reqwest
    // or the crawl task's own deadline fired
    fn categorize_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(error)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.categorize_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        // A missing header is treated as HTML, plenty of small servers omit it
        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html_content_type(content_type) {
                return Err(FetchError::UnsupportedContent {
                    content_type: content_type.to_string(),
                });
            }
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| self.categorize_error(e))?;
        trace!(url, final_url = %final_url, bytes = body.len(), "fetched page");

        Ok(Page::new(final_url, body))
    }
}

fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime == "text/html" || mime == "application/xhtml+xml"
}
