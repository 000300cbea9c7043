// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// The crawling itself lives in the library (src/lib.rs); this file only
// wires a reqwest fetcher and the image extractor into a Crawler.
// =============================================================================

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands, CrawlArgs};
use image_finder::server::{self, AppState};
use image_finder::{Category, CrawlResults, Crawler, HttpFetcher, Image, ImageExtractor};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `crawl --json` output on stdout stays parseable
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl { url, json, crawl } => handle_crawl(&url, json, &crawl).await,
        Commands::Serve { addr, crawl } => {
            let crawler = build_crawler(&crawl)?;
            server::serve(addr, Arc::new(AppState::new(crawler)))
                .await
                .with_context(|| format!("Server on {} failed", addr))
        }
    }
}

fn build_crawler(args: &CrawlArgs) -> Result<Crawler<Image>> {
    let config = args.to_config();
    let fetcher = HttpFetcher::new(&config).context("Failed to create HTTP client")?;

    let crawler: Crawler<Image> = Crawler::new(config, Arc::new(fetcher), Arc::new(ImageExtractor))
        .context("Invalid crawl settings")?;
    Ok(crawler)
}

// Handles the 'crawl' subcommand
async fn handle_crawl(url: &str, json: bool, args: &CrawlArgs) -> Result<()> {
    let crawler = build_crawler(args)?;

    let results = crawler
        .crawl(url)
        .await
        .with_context(|| format!("Crawl of {} failed", url))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(&results);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(results: &CrawlResults<Image>) {
    println!("{:<90} {:<10}", "URL", "CATEGORY");
    println!("{}", "=".repeat(101));

    // Logos first, then alphabetical, so repeated runs diff cleanly
    let mut images: Vec<&Image> = results.iter().collect();
    images.sort_by(|a, b| (!a.is_logo(), &a.url).cmp(&(!b.is_logo(), &b.url)));

    for image in &images {
        // Truncate URL if too long for display
        let url_display = if image.url.chars().count() > 87 {
            let head: String = image.url.chars().take(87).collect();
            format!("{}...", head)
        } else {
            image.url.clone()
        };

        println!("{:<90} {:<10}", url_display, image.category);
    }

    println!();

    let logos = images.iter().filter(|i| i.category == Category::Logo).count();
    println!("Summary:");
    println!("   Logos:   {}", logos);
    println!("   General: {}", images.len() - logos);
    println!("   Total:   {}", images.len());
}
