//! Command-line interface definitions for the headline crawler.
//!
//! All options can be given as flags; the output directory and the New York
//! Times key also fall back to environment variables.

use crate::scrapers::Source;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the headline crawler.
///
/// Bounds given here override the default crawl window of every selected
/// source. `--start`/`--end` are page numbers for paged sources and years for
/// calendar sources.
///
/// # Examples
///
/// ```sh
/// # Crawl two sources with their default windows
/// headline_crawler -s the-onion -s huffpost -o ./data
///
/// # First ten pages of The Beaverton, no pause between pages
/// headline_crawler -s the-beaverton --start 1 --end 10 --delay-secs 0
///
/// # NYT archive from March 2019 back to 2018
/// headline_crawler -s new-york-times --start 2019 --start-month 3 --end 2018 --nyt-api-key YOUR_KEY
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Sources to crawl, in order
    #[arg(short, long = "source", value_enum, required = true)]
    pub sources: Vec<Source>,

    /// Directory the per-source output files are appended to
    #[arg(short, long, env = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// First page, or newest year for calendar sources
    #[arg(long)]
    pub start: Option<u32>,

    /// Last page, or oldest year for calendar sources
    #[arg(long)]
    pub end: Option<u32>,

    /// Month to begin in, for calendar sources
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub start_month: Option<u32>,

    /// Day of the first month to begin on, for daily sources; the walk goes
    /// down to the 1st and then on through earlier months
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    pub start_day: Option<u32>,

    /// Seconds to pause after each listing page, overriding each source's default
    #[arg(long)]
    pub delay_secs: Option<u64>,

    /// New York Times API key
    #[arg(long, env = "NYT_API_KEY")]
    pub nyt_api_key: Option<String>,
}

impl Cli {
    pub fn delay(&self) -> Option<Duration> {
        self.delay_secs.map(Duration::from_secs)
    }
}
