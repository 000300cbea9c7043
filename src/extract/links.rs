// src/extract/links.rs
// =============================================================================
// This module extracts hyperlinks from HTML pages.
//
// We use the `scraper` crate to find every <a href> and the `url` crate to
// turn relative hrefs into absolute URLs.
//
// What comes out:
// - absolute http/https URLs only (mailto:, tel:, javascript: are skipped)
// - fragments removed, so /page and /page#top are one page
// - each URL once, in the order it first appeared on the page
//
// Domain scoping is NOT done here. The crawl task applies url_policy to
// these candidates, because only it knows which page is the parent.
// =============================================================================

use std::collections::HashSet;

use scraper::Html;
use url::Url;

use super::{resolve, selector, Extractor};
use crate::error::ExtractError;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkExtractor;

impl Extractor<String> for LinkExtractor {
    fn extract(&self, document: &Html, page_url: &Url) -> Result<Vec<String>, ExtractError> {
        let anchors = selector("a[href]")?;

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&anchors) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if let Some(link) = resolve_link(page_url, href) {
                if seen.insert(link.clone()) {
                    links.push(link);
                }
            }
        }

        Ok(links)
    }
}

// Resolves an href to an absolute, fragment-free URL worth crawling
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    // Skip anchors and special protocols
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = resolve(base, href)?;
    if !is_crawlable_link(&url) {
        return None;
    }
    url.set_fragment(None);

    Some(url.to_string())
}

fn is_crawlable_link(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
