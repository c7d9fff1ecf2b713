//! The Babylon Bee news listing scraper.
//!
//! Listing cards are `<article-card>` custom elements whose headline and path
//! are passed as bound component props:
//!
//! ```html
//! <article-card :title="&quot;Headline&quot;" :path="'/news/slug'"></article-card>
//! ```
//!
//! Prop values are JavaScript string literals, so surrounding quotes are
//! decoded before use. Paths are relative to `https://babylonbee.com`.

use super::{
    attr, base_url, extract_items, non_empty, page_url, resolve, Css, SourceDescriptor,
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

const NAME: &str = "babylonbee";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("article-card"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://babylonbee.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "babylonbee.txt",
        label: LABEL,
        enumeration: Enumeration::Pages { start: 1, end: 353 },
        delay: Duration::from_secs(2),
        user_agent: Some(BROWSER_USER_AGENT),
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    page_url(NAME, target, |page| {
        format!("https://babylonbee.com/news?page={}", page)
    })
}

/// Decode a prop value written as a JavaScript string literal.
///
/// `"..."` literals are decoded as JSON strings so escapes survive;
/// `'...'` literals and bare values only lose their quotes.
fn js_string(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        if let Ok(decoded) = serde_json::from_str::<String>(raw) {
            return decoded;
        }
    }
    raw.trim_matches(|c| c == '\'' || c == '"').to_string()
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, card| {
        let headline = non_empty(js_string(attr(card, ":title", index)?), index)?;
        let path = js_string(attr(card, ":path", index)?);
        Ok(Some(ListingRecord::new(
            headline,
            resolve(&BASE, &path, index)?,
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted Babylon Bee cards");
    results
}
