//! The Rochdale Herald date archive.
//!
//! Every day of every month from June 2021 back to January 2015 is one
//! archive page, `https://rochdaleherald.co.uk/{year}/{mm}/{dd}`.

use super::{
    attr, base_url, extract_items, non_empty, resolve, unsupported, Css, SourceDescriptor,
    SourceOptions,
};
use crate::enumerator::{CrawlTarget, Enumeration, PartialMonth};
use crate::errors::{ExtractionError, FetchError};
use crate::fetcher::BROWSER_USER_AGENT;
use crate::models::{Label, ListingRecord};
use crate::utils::strip_trailing_slash;
use once_cell::sync::Lazy;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const NAME: &str = "rochdale_herald";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("h3.entry-title.td-module-title"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://rochdaleherald.co.uk"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "rochdaleherald.txt",
        label: LABEL,
        enumeration: Enumeration::Days {
            start_year: 2021,
            start_month: 6,
            first_month: PartialMonth::Full,
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
        CrawlTarget::Day { year, month, day } => Ok(format!(
            "https://rochdaleherald.co.uk/{}/{:02}/{:02}",
            year, month, day
        )),
        ref other => Err(unsupported(NAME, other)),
    }
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, item| {
        let link = LINK.first_in(item, index)?;
        let headline = non_empty(attr(link, "title", index)?.to_string(), index)?;
        let url = resolve(&BASE, attr(link, "href", index)?, index)?;
        Ok(Some(ListingRecord::new(
            headline,
            strip_trailing_slash(&url),
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted Rochdale Herald titles");
    results
}
