//! The New Yorker's Borowitz Report column listing.

use super::{
    attr, base_url, extract_items, headline_text, page_url, resolve, Css, SourceDescriptor,
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

const NAME: &str = "new_yorker";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("div.River__riverItemContent___2hXMG"));
static HEADLINE: Lazy<Css> = Lazy::new(|| Css::new("h4.River__hed___re6RP"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://www.newyorker.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "NewYorker.txt",
        label: LABEL,
        enumeration: Enumeration::Pages { start: 1, end: 143 },
        delay: Duration::from_secs(1),
        user_agent: None,
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    page_url(NAME, target, |page| {
        format!("https://www.newyorker.com/humor/borowitz-report/page/{}", page)
    })
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, item| {
        let headline = headline_text(HEADLINE.first_in(item, index)?, index)?;
        let href = attr(LINK.first_in(item, index)?, "href", index)?;
        Ok(Some(ListingRecord::new(
            headline,
            resolve(&BASE, href, index)?,
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted Borowitz Report items");
    results
}
