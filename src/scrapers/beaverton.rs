//! The Beaverton paginated front page.

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

const NAME: &str = "the_beaverton";
const LABEL: Label = Label::Sarcastic;

static ITEM: Lazy<Css> = Lazy::new(|| Css::new(r#"h3[itemprop="headline"]"#));
static LINK: Lazy<Css> = Lazy::new(|| Css::new("a"));
static BASE: Lazy<Url> = Lazy::new(|| base_url("https://www.thebeaverton.com"));

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "the_beaverton.txt",
        label: LABEL,
        enumeration: Enumeration::Pages { start: 1, end: 779 },
        delay: Duration::from_secs(1),
        user_agent: None,
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, _options: &SourceOptions) -> Result<String, FetchError> {
    page_url(NAME, target, |page| {
        format!("https://www.thebeaverton.com/page/{}", page)
    })
}

#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let document = Html::parse_document(body);
    let results = extract_items(document.root_element(), &ITEM, |index, item| {
        let link = LINK.first_in(item, index)?;
        let headline = headline_text(link, index)?;
        let url = resolve(&BASE, attr(link, "href", index)?, index)?;
        Ok(Some(ListingRecord::new(
            headline,
            strip_trailing_slash(&url),
            LABEL,
        )))
    });
    debug!(count = results.len(), "Extracted Beaverton headlines");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        assert_eq!(
            url_for(&CrawlTarget::Page(779), &SourceOptions::default()).unwrap(),
            "https://www.thebeaverton.com/page/779"
        );
    }

    #[test]
    fn test_extract_itemprop_headlines() {
        let html = r#"
            <h3 itemprop="headline"><a href="https://www.thebeaverton.com/2021/06/moose-elected/">Moose elected mayor</a></h3>
            <h3 class="widget-title">Popular</h3>"#;
        assert_eq!(
            extract(html),
            vec![Ok(ListingRecord::new(
                "Moose elected mayor",
                "https://www.thebeaverton.com/2021/06/moose-elected",
                Label::Sarcastic
            ))]
        );
    }

    #[test]
    fn test_headline_without_href_is_reported() {
        let html = r#"
            <h3 itemprop="headline"><a>Draft headline</a></h3>
            <h3 itemprop="headline"><a href="/2021/06/geese/">Geese unionize</a></h3>"#;
        let records = extract(html);
        assert_eq!(
            records,
            vec![
                Err(ExtractionError::MissingAttribute {
                    index: 0,
                    attribute: "href"
                }),
                Ok(ListingRecord::new(
                    "Geese unionize",
                    "https://www.thebeaverton.com/2021/06/geese",
                    Label::Sarcastic
                )),
            ]
        );
    }
}
