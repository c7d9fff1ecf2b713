//! ClickHole paginated front page.

use super::{
    attr, base_url, extract_items, headline_text, page_url, resolve, Css, SourceDescriptor,
    SourceOptions,
};
use crate::enumerator::{CrawlTarget, Enumeration};
use crate::errors::{ExtractionError, FetchError};
use crate::fetcher::BROWSER_USER_AGENT;
use crate::models::{Label, ListingRecord};
use crate::utils::strip_trailing_slash;
use once_cell::sync::Lazy;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const NAME: &str = "click_hole";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("article"));
static TITLE_LINK: Lazy<Css> = Lazy::new(|| Css::new("h2.post_title a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://clickhole.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "click_hole.txt",
        label: LABEL,
        enumeration: Enumeration::Pages { start: 1, end: 1171 },
        delay: Duration::from_secs(2),
        user_agent: Some(BROWSER_USER_AGENT),
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    page_url(NAME, target, |page| format!("https://clickhole.com/page/{}/", page))
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, item| {
        let link = TITLE_LINK.first_in(item, index)?;
        let headline = headline_text(link, index)?;
        let url = resolve(&BASE, attr(link, "href", index)?, index)?;
        Ok(Some(ListingRecord::new(
            headline,
            strip_trailing_slash(&url),
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted ClickHole articles");
    results
}
