// src/lib.rs
// =============================================================================
// image-finder: crawl a website and collect the images it references.
//
// Layout:
// - url_policy: pure predicates that decide which links may be followed
// - fetch: turns a URL into a Page (the PageFetcher capability)
// - extract: turns a parsed page into items or links (the Extractor capability)
// - crawl: the engine (visited set, result store, cache, tasks, orchestrator)
// - server: the HTTP endpoint wrapped around the engine
//
// The binary (src/main.rs) only parses arguments and wires these together.
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod server;
pub mod url_policy;

pub use config::{ConfigError, CrawlConfig};
pub use crawl::{CrawlResults, Crawler};
pub use error::{CrawlError, ExtractError, FetchError, PageError};
pub use extract::{Extractor, ImageExtractor, LinkExtractor};
pub use fetch::{HttpFetcher, Page, PageFetcher};
pub use model::{Category, Image};
