//! Shared test fixtures: an in-memory website behind the PageFetcher trait.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use image_finder::{CrawlConfig, Crawler, FetchError, Image, ImageExtractor, Page, PageFetcher};
use url::Url;

enum Route {
    Html(String),
    Fail(u16),
    Hang,
}

/// A fake site: URL -> page body, with per-URL hit counters and a gauge of
/// how many fetches are running at once.
#[derive(Default)]
pub struct StaticSite {
    routes: HashMap<String, Route>,
    latency: Duration,
    hits: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.routes.insert(url.to_string(), Route::Html(html.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Route::Fail(status));
        self
    }

    /// A page whose fetch never completes
    pub fn hanging(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Route::Hang);
        self
    }

    /// Every fetch sleeps this long before answering
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

// Decrements the in-flight gauge even when the fetch future is dropped
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageFetcher for StaticSite {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.routes.get(url) {
            Some(Route::Html(body)) => Ok(Page::new(Url::parse(url)?, body.clone())),
            Some(Route::Fail(status)) => Err(FetchError::Status { status: *status }),
            Some(Route::Hang) => std::future::pending().await,
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}

/// Config for tests: no politeness delay, generous timeouts
pub fn config(max_depth: usize) -> CrawlConfig {
    CrawlConfig {
        max_depth,
        politeness_delay: Duration::ZERO,
        ..CrawlConfig::default()
    }
}

pub fn image_crawler(site: Arc<StaticSite>, config: CrawlConfig) -> Crawler<Image> {
    Crawler::new(config, site, Arc::new(ImageExtractor)).unwrap()
}

/// Sorted image URLs, for order-independent comparisons
pub fn urls(images: &[Image]) -> Vec<String> {
    let mut urls: Vec<String> = images.iter().map(|i| i.url.clone()).collect();
    urls.sort();
    urls
}
