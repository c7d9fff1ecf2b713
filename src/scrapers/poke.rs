//! The Poke news category.
//!
//! Listing cards without a teaser paragraph are promotional tiles and are
//! left out without being reported as errors.

use super::{
    attr, base_url, extract_items, headline_text, page_url, resolve, Css, SourceDescriptor,
    SourceOptions,
};
use crate::enumerator::{CrawlTarget, Enumeration};
use crate::errors::{ExtractionError, FetchError};
use crate::models::{Label, ListingRecord};
use crate::utils::strip_trailing_slash;
use once_cell::sync::Lazy;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const NAME: &str = "the_poke";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("article.boxgrid"));
static HEADLINE: Lazy<Css> = Lazy::new(|| Css::new("p"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://www.thepoke.co.uk"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "the_poke.txt",
        label: LABEL,
        enumeration: Enumeration::Pages { start: 1, end: 1000 },
        delay: Duration::from_secs(1),
        user_agent: None,
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    page_url(NAME, target, |page| {
        format!("https://www.thepoke.co.uk/category/news/page/{}", page)
    })
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, card| {
        let Some(paragraph) = HEADLINE.find_in(card) else {
            return Ok(None);
        };
        let headline = headline_text(paragraph, index)?;
        let url = resolve(&BASE, attr(LINK.first_in(card, index)?, "href", index)?, index)?;
        Ok(Some(ListingRecord::new(
            headline,
            strip_trailing_slash(&url),
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted Poke cards");
    results
}
