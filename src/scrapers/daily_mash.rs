//! The Daily Mash politics section.
//!
//! Each headline is itself the link element; hrefs are site-relative.

use super::{
    attr, base_url, extract_items, headline_text, page_url, resolve, Css, SourceDescriptor,
    SourceOptions,
};
use crate::enumerator::{CrawlTarget, Enumeration};
use crate::errors::{ExtractionError, FetchError};
use crate::fetcher::BROWSER_USER_AGENT;
use crate::models::{Label, ListingRecord};
use once_cell::sync::Lazy;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const NAME: &str = "the_dailymash";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| {
    Css::new(r"a.font-serif.font-bold.text-xl.text-brand.hover\:underline.leading-none")
});
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://www.thedailymash.co.uk"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "the_dailymash.txt",
        label: LABEL,
        enumeration: Enumeration::Pages { start: 1, end: 32 },
        delay: Duration::from_secs(1),
        user_agent: Some(BROWSER_USER_AGENT),
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    page_url(NAME, target, |page| {
        format!("https://www.thedailymash.co.uk/politics?page={}", page)
    })
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, link| {
        Ok(Some(ListingRecord::new(
            headline_text(link, index)?,
            resolve(&BASE, attr(link, "href", index)?, index)?,
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted Daily Mash headlines");
    results
}
