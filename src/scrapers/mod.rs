//! Listing-page scrapers for the supported news and satire sites.
//!
//! Every site is described by a [`SourceDescriptor`]: how its listing pages
//! are enumerated, how a target becomes a URL, how a fetched page becomes
//! records, and the constant label its records carry. The crawl engine in
//! [`crate::crawler`] drives any descriptor the same way.
//!
//! # Supported Sources
//!
//! | Source | Module | Addressing | Label |
//! |--------|--------|------------|-------|
//! | The Babylon Bee | [`babylonbee`] | page, ascending | 1 |
//! | Burrard Street Journal | [`burrard_street_journal`] | page, ascending | 1 |
//! | ClickHole | [`click_hole`] | page, ascending | 1 |
//! | Cracked | [`cracked`] | month | 1 |
//! | Euronews (Asia) | [`euronews`] | page, descending | 0 |
//! | HuffPost archive | [`huffpost`] | day | 0 |
//! | The New Yorker (Borowitz Report) | [`new_yorker`] | page, ascending | 1 |
//! | New York Times Archive API | [`nyt`] | month | 0 |
//! | The Rochdale Herald | [`rochdale_herald`] | day | 1 |
//! | The Beaverton | [`beaverton`] | page, ascending | 1 |
//! | The Daily Mash (politics) | [`daily_mash`] | page, ascending | 1 |
//! | The Daily WTF | [`daily_wtf`] | month | 1 |
//! | The Guardian (world) | [`guardian`] | page, descending | 0 |
//! | The Onion sitemap | [`onion`] | day | 1 |
//! | The Poke (news) | [`poke`] | page, ascending | 1 |
//! | TIME world sitemap | [`time_com`] | page, descending | 0 |
//!
//! # Common Patterns
//!
//! Each scraper module exports:
//! - `descriptor()`: The [`SourceDescriptor`] for the site
//! - `extract(body)`: One result per listing item found in a fetched page
//!
//! Extraction is a pure function of the page body. A listing item that lacks
//! an expected element or attribute yields an [`ExtractionError`] for that
//! item only; its siblings are still extracted.

use crate::enumerator::{CrawlTarget, Enumeration};
use crate::errors::{ExtractionError, FetchError};
use crate::models::{Label, ListingRecord};
use crate::utils::normalize_whitespace;
use clap::ValueEnum;
use scraper::{ElementRef, Selector};
use std::time::Duration;
use url::Url;

pub mod babylonbee;
pub mod beaverton;
pub mod burrard_street_journal;
pub mod click_hole;
pub mod cracked;
pub mod daily_mash;
pub mod daily_wtf;
pub mod euronews;
pub mod guardian;
pub mod huffpost;
pub mod new_yorker;
pub mod nyt;
pub mod onion;
pub mod poke;
pub mod rochdale_herald;
pub mod time_com;

/// Turns a crawl target into the URL of its listing page.
pub type UrlBuilder = fn(&CrawlTarget, &SourceOptions) -> Result<String, FetchError>;

/// Turns a fetched page body into per-item extraction results.
pub type Extractor = fn(&str) -> Vec<Result<ListingRecord, ExtractionError>>;

/// Runtime settings some sources need to address their targets.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Key for the New York Times Archive API.
    pub nyt_api_key: Option<String>,
}

/// Everything the crawl engine needs to know about one site.
#[derive(Debug, Clone, Copy)]
pub struct SourceDescriptor {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// File name of the append-only output, relative to the output directory.
    pub output_file: &'static str,
    /// Label attached to every record from this site.
    pub label: Label,
    /// Default crawl bounds.
    pub enumeration: Enumeration,
    /// Pause after each target.
    pub delay: Duration,
    /// User-agent header to send, if the site needs one.
    pub user_agent: Option<&'static str>,
    pub url_for: UrlBuilder,
    pub extract: Extractor,
}

/// Sites selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Source {
    BabylonBee,
    BurrardStreetJournal,
    ClickHole,
    Cracked,
    Euronews,
    Huffpost,
    NewYorker,
    NewYorkTimes,
    RochdaleHerald,
    TheBeaverton,
    TheDailyMash,
    TheDailyWtf,
    TheGuardian,
    TheOnion,
    ThePoke,
    Time,
}

impl Source {
    pub fn descriptor(self) -> SourceDescriptor {
        match self {
            Source::BabylonBee => babylonbee::descriptor(),
            Source::BurrardStreetJournal => burrard_street_journal::descriptor(),
            Source::ClickHole => click_hole::descriptor(),
            Source::Cracked => cracked::descriptor(),
            Source::Euronews => euronews::descriptor(),
            Source::Huffpost => huffpost::descriptor(),
            Source::NewYorker => new_yorker::descriptor(),
            Source::NewYorkTimes => nyt::descriptor(),
            Source::RochdaleHerald => rochdale_herald::descriptor(),
            Source::TheBeaverton => beaverton::descriptor(),
            Source::TheDailyMash => daily_mash::descriptor(),
            Source::TheDailyWtf => daily_wtf::descriptor(),
            Source::TheGuardian => guardian::descriptor(),
            Source::TheOnion => onion::descriptor(),
            Source::ThePoke => poke::descriptor(),
            Source::Time => time_com::descriptor(),
        }
    }

    /// Whether crawling this site needs [`SourceOptions::nyt_api_key`].
    pub fn requires_api_key(self) -> bool {
        matches!(self, Source::NewYorkTimes)
    }
}

/// A compiled CSS selector that remembers its source text for error messages.
pub(crate) struct Css {
    text: &'static str,
    selector: Selector,
}

impl Css {
    /// Compile a selector literal.
    ///
    /// # Panics
    ///
    /// Panics if `text` is not valid CSS; selectors are compile-time literals.
    pub(crate) fn new(text: &'static str) -> Self {
        let selector = Selector::parse(text)
            .unwrap_or_else(|e| panic!("invalid selector `{}`: {}", text, e));
        Self { text, selector }
    }

    /// First descendant of `element` matching this selector, if any.
    pub(crate) fn find_in<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.select(&self.selector).next()
    }

    /// Like [`Css::find_in`], but a missing match is an error for item `index`.
    pub(crate) fn first_in<'a>(
        &self,
        element: ElementRef<'a>,
        index: usize,
    ) -> Result<ElementRef<'a>, ExtractionError> {
        self.find_in(element).ok_or(ExtractionError::MissingElement {
            index,
            selector: self.text,
        })
    }
}

/// Parse a static base URL.
///
/// # Panics
///
/// Panics if `base` is not an absolute URL; bases are compile-time literals.
pub(crate) fn base_url(base: &'static str) -> Url {
    Url::parse(base).unwrap_or_else(|e| panic!("invalid base url `{}`: {}", base, e))
}

/// Run `each` over every descendant of `root` matching `item`, in document order.
///
/// `each` receives the item's position and returns `Ok(None)` for items the
/// site deliberately leaves out of its listing.
pub(crate) fn extract_items<F>(
    root: ElementRef<'_>,
    item: &Css,
    mut each: F,
) -> Vec<Result<ListingRecord, ExtractionError>>
where
    F: FnMut(usize, ElementRef<'_>) -> Result<Option<ListingRecord>, ExtractionError>,
{
    root.select(&item.selector)
        .enumerate()
        .filter_map(|(index, element)| each(index, element).transpose())
        .collect()
}

/// Value of `attribute` on `element`.
pub(crate) fn attr<'a>(
    element: ElementRef<'a>,
    attribute: &'static str,
    index: usize,
) -> Result<&'a str, ExtractionError> {
    element
        .value()
        .attr(attribute)
        .ok_or(ExtractionError::MissingAttribute { index, attribute })
}

/// Whitespace-normalized text content of `element`; empty text is an error.
pub(crate) fn headline_text(element: ElementRef<'_>, index: usize) -> Result<String, ExtractionError> {
    non_empty(element.text().collect(), index)
}

/// Whitespace-normalize `text`, rejecting an empty result.
pub(crate) fn non_empty(text: String, index: usize) -> Result<String, ExtractionError> {
    let text = normalize_whitespace(&text);
    if text.is_empty() {
        Err(ExtractionError::EmptyHeadline { index })
    } else {
        Ok(text)
    }
}

/// Resolve `href` against `base`; absolute links pass through unchanged.
pub(crate) fn resolve(base: &Url, href: &str, index: usize) -> Result<String, ExtractionError> {
    base.join(href.trim())
        .map(String::from)
        .map_err(|_| ExtractionError::InvalidLink {
            index,
            href: href.to_string(),
        })
}

/// Error for a target kind the site does not use.
pub(crate) fn unsupported(source: &str, target: &CrawlTarget) -> FetchError {
    FetchError::Target {
        target: target.to_string(),
        reason: format!("{} is not addressed this way", source),
    }
}

/// URL builder for sites addressed by a page number appended to a prefix.
pub(crate) fn page_url(
    source: &str,
    target: &CrawlTarget,
    render: impl FnOnce(u32) -> String,
) -> Result<String, FetchError> {
    match target {
        CrawlTarget::Page(page) => Ok(render(*page)),
        other => Err(unsupported(source, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_every_source_has_a_distinct_output_file() {
        let files: std::collections::HashSet<_> = Source::value_variants()
            .iter()
            .map(|s| s.descriptor().output_file)
            .collect();
        assert_eq!(files.len(), Source::value_variants().len());
    }

    #[test]
    fn test_every_source_builds_its_first_url() {
        let options = SourceOptions {
            nyt_api_key: Some("key".to_string()),
        };
        for source in Source::value_variants() {
            let descriptor = source.descriptor();
            let first = descriptor
                .enumeration
                .targets()
                .next()
                .expect("non-empty default enumeration");
            let url = (descriptor.url_for)(&first, &options).unwrap();
            assert!(Url::parse(&url).is_ok(), "{} built {}", descriptor.name, url);
        }
    }

    #[test]
    fn test_cli_names() {
        assert_eq!(
            Source::TheDailyWtf.to_possible_value().unwrap().get_name(),
            "the-daily-wtf"
        );
        assert_eq!(
            Source::NewYorkTimes.to_possible_value().unwrap().get_name(),
            "new-york-times"
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = base_url("https://www.euronews.com");
        assert_eq!(
            resolve(&base, "/2021/06/07/story", 0).unwrap(),
            "https://www.euronews.com/2021/06/07/story"
        );
        assert_eq!(
            resolve(&base, "https://other.example/a", 0).unwrap(),
            "https://other.example/a"
        );
    }

    #[test]
    fn test_page_url_rejects_calendar_targets() {
        let target = CrawlTarget::Month { year: 2021, month: 6 };
        let err = page_url("time", &target, |p| p.to_string()).unwrap_err();
        assert!(matches!(err, FetchError::Target { .. }));
    }

    #[test]
    fn test_missing_link_only_drops_that_item() {
        let html = Html::parse_document(
            r#"<ul>
                <li class="item"><a href="/a">First</a></li>
                <li class="item"><a>No link</a></li>
                <li class="item"><a href="/c">Third</a></li>
            </ul>"#,
        );
        let item = Css::new("li.item");
        let link = Css::new("a");
        let base = base_url("https://example.com");

        let results = extract_items(html.root_element(), &item, |index, element| {
            let anchor = link.first_in(element, index)?;
            let href = attr(anchor, "href", index)?;
            Ok(Some(ListingRecord::new(
                headline_text(anchor, index)?,
                resolve(&base, href, index)?,
                Label::NotSarcastic,
            )))
        });

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[1],
            Err(ExtractionError::MissingAttribute {
                index: 1,
                attribute: "href"
            })
        );
        assert_eq!(results[0].as_ref().unwrap().url, "https://example.com/a");
        assert_eq!(results[2].as_ref().unwrap().headline, "Third");
    }
}
