// src/crawl/visited.rs
// =============================================================================
// The set of URLs a crawl session has already claimed.
//
// Every session owns its own VisitedSet, so two crawls running at the same
// time (for different base URLs) never see each other's pages.
//
// Rust concepts:
// - DashSet: a HashSet split into shards, each behind its own lock, so many
//   tasks can insert at once without a single global Mutex
// - &self methods on shared state: interior mutability, the set is shared
//   through an Arc and never needs &mut
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every URL. Only call this between sessions, never while a
    /// task of the previous session may still be running.
    pub fn reset(&self) {
        self.urls.clear();
    }

    /// Claims `url` for the calling task.
    ///
    /// Returns `true` only for the first caller; the check and the insert
    /// happen under the same shard lock, so two tasks racing on one URL
    /// cannot both win.
    pub fn mark_visited(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does mark_visited return bool?
//    - The naive version is "if !is_visited(url) { mark(url); fetch(url) }"
//    - Between the check and the mark another task can run the same check
//    - insert() reports whether the value was new, so the check and the
//      mark become one step and exactly one task gets `true`
//
// 2. Why String keys and not Url?
//    - Links arrive as normalized strings from the link extractor
//    - Comparing strings is all we need, no re-parsing on every lookup
// -----------------------------------------------------------------------------
