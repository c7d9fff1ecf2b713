//! Cracked monthly article archive.
//!
//! The archive is filtered by `date_year` / `date_month` query parameters; one
//! request covers a whole month.

use super::{
    attr, base_url, extract_items, headline_text, resolve, unsupported, Css, SourceDescriptor,
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

const NAME: &str = "cracked";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("h2.title"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://www.cracked.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "cracked.txt",
        label: LABEL,
        enumeration: Enumeration::Months {
            start_year: 2021,
            start_month: 6,
            end_year: 2000,
        },
        delay: Duration::from_secs(2),
        user_agent: Some(BROWSER_USER_AGENT),
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    match *target {
        CrawlTarget::Month { year, month } => Ok(format!(
            "https://www.cracked.com/funny-articles.html?date_year={}&date_month={}",
            year, month
        )),
        ref other => Err(unsupported(NAME, other)),
    }
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, item| {
        let link = LINK.first_in(item, index)?;
        Ok(Some(ListingRecord::new(
            headline_text(link, index)?,
            resolve(&BASE, attr(link, "href", index)?, index)?,
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted Cracked titles");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_url() {
        let target = CrawlTarget::Month {
            year: 2019,
            month: 11,
        };
        assert_eq!(
            url_for(&target, &SourceOptions::default()).unwrap(),
            "https://www.cracked.com/funny-articles.html?date_year=2019&date_month=11"
        );
    }

    #[test]
    fn test_extract_titles() {
        let html = r#"
            <h2 class="title"><a href="https://www.cracked.com/article_1.html">5 Lies</a></h2>
            <h2 class="title">No anchor here</h2>"#;
        let results = extract(html);
        assert_eq!(results[0].as_ref().unwrap().headline, "5 Lies");
        assert!(results[1].is_err());
    }
}
