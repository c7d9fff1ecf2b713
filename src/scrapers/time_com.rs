//! TIME world-section HTML sitemap.
//!
//! Each sitemap part holds a single list container; its `<li>` entries are
//! the articles. A part without the container is reported as one page-level
//! error rather than as an empty page.

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

const NAME: &str = "time";
const LABEL: Label = Label::NotSarcastic;

static LIST: Lazy<Css> = Lazy::new(|| Css::new("div.ti-sitemap-list.clearfix"));
static ITEM: Lazy<Css> = Lazy::new(|| Css::new("li"));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://time.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "time.txt",
        label: LABEL,
        enumeration: Enumeration::Pages { start: 210, end: 100 },
        delay: Duration::from_secs(1),
        user_agent: None,
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    page_url(NAME, target, |page| {
        format!("https://time.com/html-sitemap/time-section-world/part/{}", page)
    })
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let list = match LIST.first_in(document.root_element(), 0) {
        Ok(list) => list,
        Err(_) => {
            return vec![Err(ExtractionError::Page(
                "sitemap list container not found".to_string(),
            ))];
        }
    };

    let results = extract_items(list, &ITEM, |index, entry| {
        let link = LINK.first_in(entry, index)?;
        let headline = headline_text(link, index)?;
        let url = resolve(&BASE, attr(link, "href", index)?, index)?;
        Ok(Some(ListingRecord::new(
            headline,
            strip_trailing_slash(&url),
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted TIME sitemap entries");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        assert_eq!(
            url_for(&CrawlTarget::Page(210), &SourceOptions::default()).unwrap(),
            "https://time.com/html-sitemap/time-section-world/part/210"
        );
    }

    #[test]
    fn test_extract_entries_inside_container() {
        let html = r#"
            <ul class="nav"><li><a href="/section/world/">World</a></li></ul>
            <div class="ti-sitemap-list clearfix">
              <ul>
                <li><a href="https://time.com/6071850/myanmar-protests/">Myanmar Protests Continue</a></li>
                <li><a href="https://time.com/6071900/eu-summit/">EU Summit Ends</a></li>
              </ul>
            </div>"#;

        let records: Vec<_> = extract(html).into_iter().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "https://time.com/6071850/myanmar-protests");
        assert_eq!(records[1].headline, "EU Summit Ends");
    }

    #[test]
    fn test_missing_container_is_page_error() {
        let results = extract("<html><body>Not found</body></html>");
        assert_eq!(
            results,
            vec![Err(ExtractionError::Page(
                "sitemap list container not found".to_string()
            ))]
        );
    }

    #[test]
    fn test_counts_down_to_page_100() {
        let targets: Vec<_> = descriptor().enumeration.targets().collect();
        assert_eq!(targets.len(), 111);
        assert_eq!(targets[0], CrawlTarget::Page(210));
        assert_eq!(targets[110], CrawlTarget::Page(100));
    }
}
