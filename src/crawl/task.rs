// src/crawl/task.rs
// =============================================================================
// One crawl task = one page.
//
// How a task runs:
// 1. Entry guard: stop if the page is too deep or another task already
//    claimed it
// 2. Fetch the page (holding one of the shared fetch slots)
// 3. Parse it once, extract items into the session's store and collect
//    candidate links
// 4. For each link that is valid, on the same host as THIS page and not
//    yet visited, spawn a child task one level deeper, pausing between
//    submissions to stay polite
// 5. Wait for every child (and so, recursively, every descendant) to finish
//
// Concurrency:
// - Waiting on children is an .await on a JoinSet; a waiting task holds
//   neither a fetch slot nor an OS thread
// - Only the fetch itself holds a semaphore permit, so the permit count
//   bounds network concurrency, not the size of the tree
//
// Failures below the root are logged and swallowed here; the orchestrator
// turns a root failure into a CrawlError.
// =============================================================================

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use scraper::Html;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

use super::store::ResultStore;
use super::visited::VisitedSet;
use crate::error::{FetchError, PageError};
use crate::extract::Extractor;
use crate::fetch::{Page, PageFetcher};
use crate::url_policy::{is_same_domain, is_valid_url};

/// Everything the tasks of one crawl share.
///
/// Built fresh for every crawl, so dedup state and limits never leak from
/// one session into another.
pub(crate) struct Session<T>
where
    T: Eq + Hash,
{
    pub(crate) max_depth: usize,
    pub(crate) politeness_delay: Duration,
    pub(crate) fetch_timeout: Duration,
    pub(crate) fetcher: Arc<dyn PageFetcher>,
    pub(crate) items: Arc<dyn Extractor<T>>,
    pub(crate) links: Arc<dyn Extractor<String>>,
    /// Shared with every other session of the same Crawler
    pub(crate) fetch_slots: Arc<Semaphore>,
    pub(crate) visited: VisitedSet,
    pub(crate) store: ResultStore<T>,
}

impl<T> Session<T>
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
{
    async fn fetch(&self, url: &str) -> Result<Page, PageError> {
        let _permit = self
            .fetch_slots
            .acquire()
            .await
            .map_err(|_| PageError::Closed)?;

        match tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(url)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout).into()),
        }
    }

    // Parses the page once and runs both extractors over it. The parsed
    // document is not Send, so it must be gone before the next .await.
    fn extract(&self, page: &Page) -> Result<(Vec<T>, Vec<String>), PageError> {
        let document = Html::parse_document(&page.body);
        let items = self.items.extract(&document, &page.url)?;
        let links = self.links.extract(&document, &page.url)?;
        Ok((items, links))
    }

    // Scope is checked against the page that contained the link, not the
    // base URL of the crawl
    fn should_follow(&self, link: &str, parent_url: &str) -> bool {
        is_valid_url(link) && is_same_domain(link, parent_url) && !self.visited.is_visited(link)
    }
}

/// Crawls `url` and its same-host descendants down to the session's depth limit.
///
/// Resolves once the page and all of its descendants are done. The error
/// only describes this page; failed children are logged, never returned.
pub(crate) fn crawl_page<T>(
    session: Arc<Session<T>>,
    url: String,
    depth: usize,
) -> BoxFuture<'static, Result<(), PageError>>
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
{
    run_task(session, url, depth).boxed()
}

async fn run_task<T>(session: Arc<Session<T>>, url: String, depth: usize) -> Result<(), PageError>
where
    T: Eq + Hash + Clone + Send + Sync + 'static,
{
    if depth >= session.max_depth {
        trace!(%url, depth, "depth limit reached");
        return Ok(());
    }
    if !session.visited.mark_visited(&url) {
        trace!(%url, "already visited");
        return Ok(());
    }

    debug!(%url, depth, "crawling page");
    let page = session.fetch(&url).await?;
    let (items, links) = session.extract(&page)?;

    let added = session.store.append_all(items);
    debug!(%url, added, candidates = links.len(), "extracted page");

    let mut children = JoinSet::new();
    for link in links {
        if !session.should_follow(&link, &url) {
            continue;
        }
        if !children.is_empty() && !session.politeness_delay.is_zero() {
            tokio::time::sleep(session.politeness_delay).await;
        }
        children.spawn(crawl_page(Arc::clone(&session), link, depth + 1));
    }

    while let Some(joined) = children.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(parent = %url, error = %e, "subpage crawl failed"),
            Err(e) if e.is_cancelled() => {}
            Err(e) => warn!(parent = %url, error = %e, "subpage task panicked"),
        }
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why the crawl_page / run_task split?
//    - An async fn that calls itself would have an infinitely sized future
//      (the future contains the child future, which contains...)
//    - crawl_page boxes run_task, so each level lives on the heap
//    - .boxed() also checks the future is Send, which tokio::spawn needs
//
// 2. What is JoinSet?
//    - A collection of spawned tasks you can await one by one
//    - join_next() returns them in completion order, not spawn order
//    - Dropping a JoinSet aborts every task still in it. Because each task
//      owns the JoinSet of its children, aborting the root cancels the
//      whole tree
//
// 3. Why Arc<Session<T>>?
//    - Every task in the tree needs the same visited set and result store
//    - Arc is a thread-safe reference counter, cloning it is cheap
//    - The session is freed when the last task holding it finishes
//
// 4. Why is the politeness sleep inside the loop?
//    - It spaces out the submissions of ONE page's children
//    - Pages in other branches are not slowed down by it
// -----------------------------------------------------------------------------
