//! HuffPost daily archive scraper.
//!
//! # URL Pattern
//!
//! ```text
//! https://www.huffpost.com/archive/2021-06-30
//! ```
//!
//! # Crawl Window
//!
//! June 2021 is crawled from the 30th down to the 7th, then every day of
//! every earlier month through January 2020.

use super::{
    attr, base_url, extract_items, headline_text, resolve, unsupported, Css, SourceDescriptor,
    SourceOptions,
};
use crate::enumerator::{CrawlTarget, Enumeration, PartialMonth};
use crate::errors::{ExtractionError, FetchError};
use crate::fetcher::BROWSER_USER_AGENT;
use crate::models::{Label, ListingRecord};
use once_cell::sync::Lazy;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const NAME: &str = "huffpost";
const LABEL: Label = Label::NotSarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("div.card__headline"));
static HEADLINE: Lazy<Css> = Lazy::new(|| Css::new("div.card__headline__text"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a.card__link.yr-card-headline"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://www.huffpost.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "huffpost_data.txt",
        label: LABEL,
        enumeration: Enumeration::Days {
            start_year: 2021,
            start_month: 6,
            first_month: PartialMonth::DownTo(7),
            end_year: 2020,
        },
        delay: Duration::from_secs(1),
        user_agent: Some(BROWSER_USER_AGENT),
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    match *target {
        CrawlTarget::Day { year, month, day } => Ok(format!(
            "https://www.huffpost.com/archive/{}-{:02}-{:02}",
            year, month, day
        )),
        ref other => Err(unsupported(NAME, other)),
    }
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, card| {
        let headline = headline_text(HEADLINE.first_in(card, index)?, index)?;
        let link = LINK.first_in(card, index)?;
        Ok(Some(ListingRecord::new(
            headline,
            resolve(&BASE, attr(link, "href", index)?, index)?,
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted HuffPost cards");
    results
}
