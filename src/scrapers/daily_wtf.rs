//! The Daily WTF monthly article index.

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

const NAME: &str = "the_dailywtf";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new("div.article-content"));
static HEADLINE: Lazy<Css> = Lazy::new(|| Css::new("h2"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://thedailywtf.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "the_dailywtf.txt",
        label: LABEL,
        enumeration: Enumeration::Months {
            start_year: 2021,
            start_month: 6,
            end_year: 2000,
        },
        delay: Duration::from_secs(1),
        user_agent: Some(BROWSER_USER_AGENT),
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    match *target {
        CrawlTarget::Month { year, month } => {
            Ok(format!("https://thedailywtf.com/articles/{}/{}", year, month))
        }
        ref other => Err(unsupported(NAME, other)),
    }
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
    debug!(count = results.len(), "Extracted Daily WTF articles");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_url() {
        let target = CrawlTarget::Month { year: 2009, month: 3 };
        assert_eq!(
            url_for(&target, &SourceOptions::default()).unwrap(),
            "https://thedailywtf.com/articles/2009/3"
        );
        assert!(url_for(&CrawlTarget::Page(1), &SourceOptions::default()).is_err());
    }

    #[test]
    fn test_extract_articles() {
        let html = r#"
            <div class="article-content">
              <h2><a href="/articles/the-sql-that-wasnt">The SQL That Wasn't</a></h2>
            </div>
            <div class="article-content"><h2>Orphan</h2></div>"#;
        let results = extract(html);
        assert_eq!(
            results[0],
            Ok(ListingRecord::new(
                "The SQL That Wasn't",
                "https://thedailywtf.com/articles/the-sql-that-wasnt",
                Label::Sarcastic
            ))
        );
        assert_eq!(
            results[1],
            Err(ExtractionError::MissingElement {
                index: 1,
                selector: "a"
            })
        );
    }
}
