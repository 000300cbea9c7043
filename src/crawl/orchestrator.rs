// src/crawl/orchestrator.rs
// =============================================================================
// The Crawler: entry point of the engine.
//
// crawl(base_url):
// 1. Validate and normalize the base URL
// 2. Return the cached result if this base URL was crawled before
// 3. Otherwise build a fresh Session, spawn the root task and wait for the
//    whole tree, bounded by the crawl deadline
// 4. Snapshot the store, cache the snapshot, return it
//
// A Crawler is meant to be shared (e.g. behind an Arc in the HTTP server).
// All of its sessions share one fetch semaphore and one cache; each session
// has its own visited set and result store.
// =============================================================================

use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use url::Url;

use super::cache::ResultCache;
use super::store::{CrawlResults, ResultStore};
use super::task::{crawl_page, Session};
use super::visited::VisitedSet;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extract::{Extractor, LinkExtractor};
use crate::fetch::PageFetcher;

pub struct Crawler<T> {
    config: CrawlConfig,
    fetcher: Arc<dyn PageFetcher>,
    items: Arc<dyn Extractor<T>>,
    links: Arc<dyn Extractor<String>>,
    fetch_slots: Arc<Semaphore>,
    cache: ResultCache<T>,
}

impl<T> Crawler<T>
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
{
    /// Builds a crawler that collects `T` with `items` and follows links
    /// found by the default `LinkExtractor`.
    pub fn new(
        config: CrawlConfig,
        fetcher: Arc<dyn PageFetcher>,
        items: Arc<dyn Extractor<T>>,
    ) -> Result<Self, CrawlError> {
        config.validate()?;

        Ok(Self {
            fetch_slots: Arc::new(Semaphore::new(config.max_in_flight)),
            config,
            fetcher,
            items,
            links: Arc::new(LinkExtractor),
            cache: ResultCache::new(),
        })
    }

    /// Replaces the link extractor (which links count as children).
    pub fn with_link_extractor(mut self, links: Arc<dyn Extractor<String>>) -> Self {
        self.links = links;
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResultCache<T> {
        &self.cache
    }

    /// Crawls `base_url` and everything reachable from it on the same host,
    /// down to the configured depth.
    ///
    /// Only a bad base URL, a failed root page or the session deadline are
    /// errors. Broken subpages just contribute nothing. Dropping the returned
    /// future cancels every task of the session.
    pub async fn crawl(&self, base_url: &str) -> Result<CrawlResults<T>, CrawlError> {
        let root = parse_base_url(base_url)?;
        let key = root.to_string();

        if let Some(cached) = self.cache.get(&key) {
            info!(url = %key, items = cached.len(), "returning cached crawl");
            return Ok(cached);
        }

        info!(url = %key, max_depth = self.config.max_depth, "starting crawl");
        let started = Instant::now();

        let session = Arc::new(self.new_session());
        let mut root_task = JoinSet::new();
        root_task.spawn(crawl_page(Arc::clone(&session), key.clone(), 0));

        // On timeout root_task is dropped here, which aborts the root task
        // and through it every descendant
        let deadline = self.config.crawl_timeout;
        let joined = match tokio::time::timeout(deadline, root_task.join_next()).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(url = %key, after = ?deadline, "crawl deadline exceeded");
                return Err(CrawlError::Timeout {
                    url: key,
                    after: deadline,
                });
            }
        };

        match joined {
            Some(Ok(Ok(()))) | None => {}
            Some(Ok(Err(source))) => return Err(CrawlError::RootFailed { url: key, source }),
            Some(Err(e)) => {
                return Err(CrawlError::TaskFailed {
                    url: key,
                    reason: e.to_string(),
                })
            }
        }

        let results = session.store.snapshot();
        info!(
            url = %key,
            pages = session.visited.len(),
            items = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "finished crawl"
        );

        Ok(self.cache.insert(key, results))
    }

    fn new_session(&self) -> Session<T> {
        Session {
            max_depth: self.config.max_depth,
            politeness_delay: self.config.politeness_delay,
            fetch_timeout: self.config.fetch_timeout,
            fetcher: Arc::clone(&self.fetcher),
            items: Arc::clone(&self.items),
            links: Arc::clone(&self.links),
            fetch_slots: Arc::clone(&self.fetch_slots),
            visited: VisitedSet::new(),
            store: ResultStore::new(),
        }
    }
}

// The normalized form is what the root task visits and what the cache is
// keyed on, so "https://site.com" and "https://site.com/" are one entry
fn parse_base_url(base_url: &str) -> Result<Url, CrawlError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(CrawlError::InvalidUrl {
            url: base_url.to_string(),
            reason: "URL is empty".to_string(),
        });
    }

    let mut url = Url::parse(trimmed).map_err(|e| CrawlError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(CrawlError::InvalidUrl {
            url: base_url.to_string(),
            reason: "only http and https URLs with a host can be crawled".to_string(),
        });
    }

    url.set_fragment(None);
    Ok(url)
}
