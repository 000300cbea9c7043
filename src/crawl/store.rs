// src/crawl/store.rs
// =============================================================================
// Where a running session collects its items, and the frozen snapshot it
// hands back once the crawl is over.
//
// ResultStore: append-only, shared by every task of one session, deduped by
//              item identity (first writer wins).
// CrawlResults: an immutable, cheaply clonable copy taken after the whole
//              traversal finished. This is what gets cached and returned.
// =============================================================================

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashSet;
use serde::{Serialize, Serializer};

#[derive(Debug)]
pub struct ResultStore<T>
where
    T: Eq + Hash,
{
    items: DashSet<T>,
}

impl<T> Default for ResultStore<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self {
            items: DashSet::new(),
        }
    }
}

impl<T> ResultStore<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item` unless an equal one is already stored; returns whether it was added.
    pub fn append(&self, item: T) -> bool {
        self.items.insert(item)
    }

    /// Adds every item, returning how many were new.
    pub fn append_all(&self, items: impl IntoIterator<Item = T>) -> usize {
        items
            .into_iter()
            .map(|item| self.append(item))
            .filter(|added| *added)
            .count()
    }

    /// Copies everything stored so far. Only meaningful once the session is
    /// done; while tasks are still appending the copy may miss items.
    pub fn all(&self) -> Vec<T> {
        self.items.iter().map(|item| item.key().clone()).collect()
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn snapshot(&self) -> CrawlResults<T> {
        CrawlResults::from(self.all())
    }
}

/// The finished, read-only item set of one crawl.
#[derive(Debug)]
pub struct CrawlResults<T> {
    items: Arc<[T]>,
}

// Manual impl: cloning shares the Arc and must not require `T: Clone`
impl<T> Clone for CrawlResults<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> CrawlResults<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> From<Vec<T>> for CrawlResults<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<T: Serialize> Serialize for CrawlResults<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Image};

    #[test]
    fn test_same_url_stored_once() {
        let store = ResultStore::new();
        assert!(store.append(Image::new("https://example.com/a.png", Category::Logo)));
        assert!(!store.append(Image::new("https://example.com/a.png", Category::General)));

        assert_eq!(store.size(), 1);
        // First writer wins
        assert_eq!(store.all()[0].category, Category::Logo);
    }

    #[test]
    fn test_append_all_counts_new_items() {
        let store = ResultStore::new();
        store.append("a".to_string());

        let added = store.append_all(vec!["a".to_string(), "b".to_string(), "c".to_string()]);

        assert_eq!(added, 2);
        assert_eq!(store.size(), 3);
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let store = ResultStore::new();
        store.append(1u32);
        let snapshot = store.snapshot();

        store.append(2u32);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn test_results_serialize_as_array() {
        let results = CrawlResults::from(vec![Image::new("https://example.com/x.gif", Category::General)]);
        let json = serde_json::to_string(&results).unwrap();
        assert_eq!(json, r#"[{"url":"https://example.com/x.gif","category":"GENERAL"}]"#);
    }
}
