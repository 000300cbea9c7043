// src/extract/images.rs
// =============================================================================
// This module extracts image references from HTML pages.
//
// For every <img src> on the page:
// 1. Resolve src against the page URL
// 2. Strip CDN resize segments like `resize:fill:128:128/`, otherwise the
//    same picture shows up once per thumbnail size
// 3. Drop anything that is not a valid absolute URL (data: URIs included)
// 4. Classify: a keyword like "logo" or "brand" in the URL or the alt text
//    makes it a Logo, everything else is General
// =============================================================================

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::Html;
use tracing::trace;
use url::Url;

use super::{resolve, selector, Extractor};
use crate::error::ExtractError;
use crate::model::{Category, Image};
use crate::url_policy::is_valid_url;

static RESIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"resize:fill:\d+:\d+/").expect("resize pattern is valid"));

static LOGO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)logo|brand|icon|symbol|company|badge|emblem|mark|trademark")
        .expect("logo pattern is valid")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageExtractor;

impl Extractor<Image> for ImageExtractor {
    fn extract(&self, document: &Html, page_url: &Url) -> Result<Vec<Image>, ExtractError> {
        let images = selector("img[src]")?;

        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for element in document.select(&images) {
            let Some(src) = element.value().attr("src") else {
                continue;
            };
            let Some(absolute) = resolve(page_url, src) else {
                continue;
            };

            let src = clean_image_url(absolute.as_str());
            if !is_valid_url(&src) {
                continue;
            }

            let alt = element.value().attr("alt").unwrap_or("");
            let category = if is_logo_image(&src, alt) {
                trace!(src = %src, alt, "classified as logo");
                Category::Logo
            } else {
                Category::General
            };

            let image = Image::new(src, category);
            if seen.insert(image.clone()) {
                found.push(image);
            }
        }

        Ok(found)
    }
}

/// Removes `resize:fill:W:H/` segments so resized copies share one URL.
pub fn clean_image_url(url: &str) -> String {
    RESIZE_PATTERN.replace_all(url, "").into_owned()
}

/// Keyword heuristic: does the URL or the alt text look like a logo?
pub fn is_logo_image(image_url: &str, alt_text: &str) -> bool {
    LOGO_PATTERN.is_match(image_url) || LOGO_PATTERN.is_match(alt_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(html: &str, page: &str) -> Vec<Image> {
        let document = Html::parse_document(html);
        let page = Url::parse(page).unwrap();
        ImageExtractor.extract(&document, &page).unwrap()
    }

    #[test]
    fn test_relative_src_is_resolved() {
        let found = images(r#"<img src="/static/cat.jpg">"#, "https://example.com/pets/");
        assert_eq!(found, vec![Image::new("https://example.com/static/cat.jpg", Category::General)]);
    }

    #[test]
    fn test_logo_from_alt_text() {
        let found = images(
            r#"<img src="/img/header.png" alt="ACME Company">"#,
            "https://example.com/",
        );
        assert_eq!(found.len(), 1);
        assert!(found[0].is_logo());
    }

    #[test]
    fn test_logo_from_url_any_case() {
        assert!(is_logo_image("https://cdn.example.com/Brand/Main.svg", ""));
        assert!(!is_logo_image("https://cdn.example.com/photos/beach.jpg", "A beach"));
    }

    #[test]
    fn test_resize_segments_are_removed() {
        let cleaned = clean_image_url("https://cdn.example.com/resize:fill:128:128/abc.png");
        assert_eq!(cleaned, "https://cdn.example.com/abc.png");
    }

    #[test]
    fn test_resized_copies_collapse() {
        let html = r#"
            <img src="https://cdn.example.com/resize:fill:64:64/abc.png">
            <img src="https://cdn.example.com/resize:fill:256:256/abc.png">
        "#;
        let found = images(html, "https://example.com/");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://cdn.example.com/abc.png");
    }

    #[test]
    fn test_data_uris_are_skipped() {
        let html = r#"<img src="data:image/gif;base64,R0lGODlhAQABAAAAACw="><img src="">"#;
        assert!(images(html, "https://example.com/").is_empty());
    }
}
