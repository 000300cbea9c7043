// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: one-shot crawl of a site, prints the images it found
// - serve: runs the HTTP endpoint (POST /main?url=...)
//
// Both share the same crawl tuning flags (CrawlArgs), which can also be set
// through IMAGE_FINDER_* environment variables.
// =============================================================================

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use image_finder::config::{
    CrawlConfig, DEFAULT_CRAWL_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_IN_FLIGHT, DEFAULT_POLITENESS_DELAY_MS,
};

#[derive(Parser, Debug)]
#[command(
    name = "image-finder",
    version,
    about = "Crawl a website and list the images it references",
    long_about = "image-finder follows same-host links from a base URL down to a fixed depth \
                  and collects every <img> it finds, flagging the ones that look like logos."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website once and print the images found
    ///
    /// Example: image-finder crawl https://example.com --max-depth 3
    Crawl {
        /// Base URL to start from (e.g., https://example.com)
        url: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Serve crawls over HTTP
    ///
    /// Example: curl -X POST 'http://127.0.0.1:8080/main?url=https://example.com'
    Serve {
        /// Address to listen on
        #[arg(long, env = "IMAGE_FINDER_ADDR", default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        #[command(flatten)]
        crawl: CrawlArgs,
    },
}

/// Crawl tuning shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Link hops to follow from the base URL
    ///
    /// Depth 1 = just the base page
    /// Depth 2 = base page + every page it links to
    #[arg(long, env = "IMAGE_FINDER_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Milliseconds to wait between child pages submitted by the same page
    #[arg(long, env = "IMAGE_FINDER_DELAY_MS", default_value_t = DEFAULT_POLITENESS_DELAY_MS)]
    pub delay_ms: u64,

    /// Maximum number of pages fetched at the same time
    #[arg(long, env = "IMAGE_FINDER_MAX_IN_FLIGHT", default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    pub max_in_flight: usize,

    /// Seconds before a single page fetch is abandoned
    #[arg(long, env = "IMAGE_FINDER_FETCH_TIMEOUT", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_secs: u64,

    /// Seconds before a whole crawl is abandoned
    #[arg(long, env = "IMAGE_FINDER_CRAWL_TIMEOUT", default_value_t = DEFAULT_CRAWL_TIMEOUT_SECS)]
    pub crawl_timeout_secs: u64,

    /// User-Agent header sent with every request (defaults to image-finder/<version>)
    #[arg(long, env = "IMAGE_FINDER_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl CrawlArgs {
    pub fn to_config(&self) -> CrawlConfig {
        let mut config = CrawlConfig {
            max_depth: self.max_depth,
            politeness_delay: Duration::from_millis(self.delay_ms),
            max_in_flight: self.max_in_flight,
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            crawl_timeout: Duration::from_secs(self.crawl_timeout_secs),
            ..CrawlConfig::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[command(flatten)] do?
//    - It inlines the fields of another Args struct into this subcommand
//    - Both `crawl` and `serve` get --max-depth, --delay-ms, ... for free
//
// 2. What does env = "..." do?
//    - If the flag is not given, clap reads the environment variable
//    - Handy for the server, where flags are awkward in container configs
//
// 3. Why SocketAddr for --addr?
//    - clap parses it for us and rejects "localhost:abc" before we start
// -----------------------------------------------------------------------------
