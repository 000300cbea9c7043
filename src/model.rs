// src/model.rs
// =============================================================================
// The items this crawler collects: image references with a coarse category.
//
// Identity is the URL alone. Two images with the same URL but different
// categories are the same item, and whichever one was stored first wins.
// =============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Heuristic bucket assigned by the image extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Logo,
    General,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so table columns like {:<10} line up
        match self {
            Category::Logo => f.pad("logo"),
            Category::General => f.pad("general"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Image {
    pub url: String,
    pub category: Category,
}

impl Image {
    pub fn new(url: impl Into<String>, category: Category) -> Self {
        Self {
            url: url.into(),
            category,
        }
    }

    pub fn is_logo(&self) -> bool {
        self.category == Category::Logo
    }
}

// Equality and hashing ignore the category on purpose, see module docs
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Image {}

impl Hash for Image {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}
