//! # Headline Crawler
//!
//! Collects `(headline, url, label)` records from the listing pages of news
//! and satire sites, for building sarcasm-detection datasets. Every site's
//! records carry a fixed label: `1` for satire, `0` for conventional news.
//!
//! ## Usage
//!
//! ```sh
//! headline_crawler -s the-onion -s the-guardian -o ./data
//! ```
//!
//! ## Architecture
//!
//! Each selected source is crawled to completion before the next one starts:
//! 1. **Enumeration**: Walk the source's pages, months or days in order
//! 2. **Fetching**: Download one listing page per target
//! 3. **Extraction**: Turn listing items into records, skipping broken items
//! 4. **Output**: Append `headline|url|label` lines to the source's file

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod calendar;
mod cli;
mod crawler;
mod enumerator;
mod errors;
mod fetcher;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use crawler::{CrawlObserver, Crawler, TracingObserver};
use fetcher::HttpFetcher;
use scrapers::SourceOptions;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("headline_crawler starting up");

    let args = Cli::parse();
    debug!(sources = ?args.sources, output_dir = %args.output_dir.display(), "Parsed CLI arguments");

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    if args.nyt_api_key.is_none() && args.sources.iter().any(|s| s.requires_api_key()) {
        error!("new-york-times needs an API key (--nyt-api-key or NYT_API_KEY)");
        return Err("missing New York Times API key".into());
    }

    let options = SourceOptions {
        nyt_api_key: args.nyt_api_key.clone(),
    };
    let fetcher = HttpFetcher::new();
    let observer: Arc<dyn CrawlObserver> = Arc::new(TracingObserver);

    let mut total_written = 0;
    for source in &args.sources {
        let descriptor = source.descriptor();
        let enumeration = descriptor
            .enumeration
            .with_range(args.start, args.end)
            .with_first_period(args.start_month, args.start_day);

        let mut crawler = Crawler::new(descriptor, fetcher.clone(), observer.clone(), &args.output_dir)
            .with_options(options.clone())
            .with_enumeration(enumeration);
        if let Some(delay) = args.delay() {
            crawler = crawler.with_delay(delay);
        }

        info!(
            source = descriptor.name,
            label = %descriptor.label,
            path = %crawler.output_path().display(),
            "Starting crawl"
        );
        let stats = crawler.run().await;
        debug!(source = descriptor.name, state = ?crawler.state(), "Crawler finished");
        total_written += stats.records_written;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        records = total_written,
        "Execution complete"
    );

    Ok(())
}
