//! Euronews Asia section, crawled from the oldest listed page back to page 1.

use super::{
    attr, base_url, extract_items, non_empty, page_url, resolve, Css, SourceDescriptor,
    SourceOptions,
};
use crate::enumerator::{CrawlTarget, Enumeration};
use crate::errors::{ExtractionError, FetchError};
use crate::models::{Label, ListingRecord};
use once_cell::sync::Lazy;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const NAME: &str = "euronews";
const LABEL: Label = Label::NotSarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("div.m-object__description"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://www.euronews.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "euronews.com.txt",
        label: LABEL,
        enumeration: Enumeration::Pages { start: 415, end: 1 },
        delay: Duration::from_secs(1),
        user_agent: None,
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    page_url(NAME, target, |page| {
        format!("https://www.euronews.com/news/asia?p={}", page)
    })
}

/// Headlines come from the link's `title` attribute; links are site-relative.
#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, item| {
        let link = LINK.first_in(item, index)?;
        let headline = non_empty(attr(link, "title", index)?.to_string(), index)?;
        let url = resolve(&BASE, attr(link, "href", index)?, index)?;
        Ok(Some(ListingRecord::new(headline, url, LABEL)))
    });
    debug!(count = results.len(), "Extracted Euronews items");
    results
}
