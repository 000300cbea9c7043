// src/extract/mod.rs
// =============================================================================
// This module pulls typed data out of a parsed HTML page.
//
// Submodules:
// - images: <img src> references, classified as logo or general
// - links: <a href> targets, the candidates for the next crawl level
//
// Both implement the same Extractor<T> trait, so the crawl engine only
// needs to know "give me a Vec<T> for this page" and stays generic over
// what it is collecting.
// =============================================================================

mod images;
mod links;

use scraper::{Html, Selector};
use url::Url;

use crate::error::ExtractError;

pub use images::ImageExtractor;
pub use links::LinkExtractor;

/// Pulls a collection of `T` out of one parsed page.
///
/// Implementations must not touch crawl state; the crawl task decides what
/// to store and what to follow.
pub trait Extractor<T>: Send + Sync {
    fn extract(&self, document: &Html, page_url: &Url) -> Result<Vec<T>, ExtractError>;
}

// Selectors are tiny to parse and scraper's Selector is not guaranteed to
// be Sync, so each call builds its own
fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css,
        reason: e.to_string(),
    })
}

// Resolves a possibly-relative reference against the page it appeared on.
//
// Examples (page = "https://example.com/docs/"):
//   "/about"             -> Some("https://example.com/about")
//   "img/a.png"          -> Some("https://example.com/docs/img/a.png")
//   "https://other.com"  -> Some("https://other.com/")
//   "http://[bad"        -> None
fn resolve(page_url: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    page_url.join(reference).ok()
}
