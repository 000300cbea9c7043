// src/crawl/cache.rs
// =============================================================================
// Finished crawls, keyed by base URL.
//
// The first completed crawl for a base URL is kept for the lifetime of the
// process; nothing is evicted or expires. Entries are CrawlResults
// snapshots, so a reader can never observe a crawl that is still writing.
// =============================================================================

use dashmap::DashMap;

use super::store::CrawlResults;

#[derive(Debug)]
pub struct ResultCache<T> {
    entries: DashMap<String, CrawlResults<T>>,
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<T> ResultCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, base_url: &str) -> Option<CrawlResults<T>> {
        self.entries.get(base_url).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, base_url: &str) -> bool {
        self.entries.contains_key(base_url)
    }

    /// Stores `results` unless another crawl of the same URL got there first.
    /// Returns whichever entry ends up in the cache.
    pub fn insert(&self, base_url: String, results: CrawlResults<T>) -> CrawlResults<T> {
        self.entries.entry(base_url).or_insert(results).value().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
