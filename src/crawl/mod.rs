// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Recursive crawling starting from a base URL, one tokio task per page
// - Same-host restriction (a link is only followed if it is on the same
//   host as the page it was found on)
// - Configurable depth limit
// - Polite crawling with delays between child submissions
// - A cap on concurrent fetches shared by every crawl
// - Per-base-URL cache of finished crawls
//
// Submodules:
// - visited: which URLs a session already claimed
// - store: where a session collects items, and the frozen result
// - cache: finished results by base URL
// - task: the per-page crawl task
// - orchestrator: the Crawler that ties it all together
// =============================================================================

mod cache;
mod orchestrator;
mod store;
mod task;
mod visited;

pub use cache::ResultCache;
pub use orchestrator::Crawler;
pub use store::{CrawlResults, ResultStore};
pub use visited::VisitedSet;
