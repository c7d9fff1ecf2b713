//! The Onion daily sitemap scraper.
//!
//! The Onion lists every article of a day on a sitemap page, which makes the
//! archive reachable without following pagination links.
//!
//! # URL Pattern
//!
//! ```text
//! https://www.theonion.com/sitemap/{year}/{month name}/{day}
//! https://www.theonion.com/sitemap/2021/june/7
//! ```
//!
//! # Crawl Window
//!
//! 7 June 2021 back to 1 January 2015, newest first. The first month is walked
//! from the 7th down to the 1st.

use super::{
    attr, base_url, extract_items, headline_text, resolve, unsupported, Css, SourceDescriptor,
    SourceOptions,
};
use crate::calendar::month_name;
use crate::enumerator::{CrawlTarget, Enumeration, PartialMonth};
use crate::errors::{ExtractionError, FetchError};
use crate::fetcher::BROWSER_USER_AGENT;
use crate::models::{Label, ListingRecord};
use once_cell::sync::Lazy;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const NAME: &str = "the_onion";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("h4.sc-1w8kdgf-1.bwRmiu.js_sitemap-article"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://www.theonion.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "the_onion.txt",
        label: LABEL,
        enumeration: Enumeration::Days {
            start_year: 2021,
            start_month: 6,
            first_month: PartialMonth::Through(7),
            end_year: 2015,
        },
        delay: Duration::from_secs(1),
        user_agent: Some(BROWSER_USER_AGENT),
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    match *target {
        CrawlTarget::Day { year, month, day } => {
            let month = month_name(month).ok_or_else(|| FetchError::Target {
                target: target.to_string(),
                reason: "month out of range".to_string(),
            })?;
            Ok(format!(
                "https://www.theonion.com/sitemap/{}/{}/{}",
                year, month, day
            ))
        }
        ref other => Err(unsupported(NAME, other)),
    }
}

/// Extract sitemap entries: one `<h4>` per article wrapping its link.
#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, item| {
        let link = LINK.first_in(item, index)?;
        let headline = headline_text(link, index)?;
        let href = attr(link, "href", index)?;
        Ok(Some(ListingRecord::new(
            headline,
            resolve(&BASE, href, index)?,
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted Onion sitemap entries");
    results
}
