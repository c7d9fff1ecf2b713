//! New York Times Archive API client.
//!
//! Unlike the other sources this one is a JSON API: one request returns every
//! article published in a month. Only the first [`MAX_DOCS_PER_MONTH`]
//! documents of each month are kept.
//!
//! # URL Pattern
//!
//! ```text
//! https://api.nytimes.com/svc/archive/v1/{year}/{month}.json?api-key={key}
//! ```
//!
//! The API key comes from [`SourceOptions::nyt_api_key`]; without it no
//! target can be addressed.

use super::{non_empty, unsupported, SourceDescriptor, SourceOptions};
use crate::enumerator::{CrawlTarget, Enumeration};
use crate::errors::{ExtractionError, FetchError};
use crate::fetcher::BROWSER_USER_AGENT;
use crate::models::{Label, ListingRecord};
use crate::utils::truncate_for_log;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const NAME: &str = "new_york_times";
const LABEL: Label = Label::NotSarcastic;

/// Cap on documents taken from a single month.
pub const MAX_DOCS_PER_MONTH: usize = 500;

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    response: ArchiveBody,
}

#[derive(Debug, Deserialize)]
struct ArchiveBody {
    docs: Vec<Value>,
}

pub fn descriptor() -> SourceDescriptor {
    SourceDescriptor {
        name: NAME,
        output_file: "newyork_times.txt",
        label: LABEL,
        enumeration: Enumeration::Months {
            start_year: 2021,
            start_month: 6,
            end_year: 2017,
        },
        delay: Duration::from_secs(1),
        user_agent: Some(BROWSER_USER_AGENT),
        url_for,
        extract,
    }
}

fn url_for(target: &CrawlTarget, options: &SourceOptions) -> Result<String, FetchError> {
    match *target {
        CrawlTarget::Month { year, month } => {
            let key = options
                .nyt_api_key
                .as_deref()
                .ok_or_else(|| FetchError::Target {
                    target: target.to_string(),
                    reason: "no New York Times API key configured".to_string(),
                })?;
            Ok(format!(
                "https://api.nytimes.com/svc/archive/v1/{}/{}.json?api-key={}",
                year,
                month,
                urlencoding::encode(key)
            ))
        }
        ref other => Err(unsupported(NAME, other)),
    }
}

/// Extract `headline.main` and `web_url` from each archive document.
#[instrument(level = "debug", skip_all, fields(bytes = body.len()))]
pub fn extract(body: &str) -> Vec<Result<ListingRecord, ExtractionError>> {
    let archive: ArchiveResponse = match serde_json::from_str(body) {
        Ok(archive) => archive,
        Err(e) => {
            return vec![Err(ExtractionError::Page(format!(
                "archive response not understood ({}): {}",
                e,
                truncate_for_log(body, 120)
            )))];
        }
    };

    let results: Vec<_> = archive
        .response
        .docs
        .iter()
        .take(MAX_DOCS_PER_MONTH)
        .enumerate()
        .map(|(index, doc)| -> Result<ListingRecord, ExtractionError> {
            let headline = doc
                .pointer("/headline/main")
                .and_then(Value::as_str)
                .ok_or(ExtractionError::MissingAttribute {
                    index,
                    attribute: "headline.main",
                })?;
            let url = doc
                .get("web_url")
                .and_then(Value::as_str)
                .ok_or(ExtractionError::MissingAttribute {
                    index,
                    attribute: "web_url",
                })?;
            Ok(ListingRecord::new(
                non_empty(headline.to_string(), index)?,
                url,
                LABEL,
            ))
        })
        .collect();
    debug!(count = results.len(), "Extracted NYT archive documents");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_requires_key() {
        let target = CrawlTarget::Month {
            year: 2021,
            month: 6,
        };
        assert!(matches!(
            url_for(&target, &SourceOptions::default()),
            Err(FetchError::Target { .. })
        ));

        let options = SourceOptions {
            nyt_api_key: Some("a b&c".to_string()),
        };
        assert_eq!(
            url_for(&target, &options).unwrap(),
            "https://api.nytimes.com/svc/archive/v1/2021/6.json?api-key=a%20b%26c"
        );
    }

    #[test]
    fn test_extract_docs() {
        let body = json!({
            "response": {
                "docs": [
                    {"headline": {"main": "Markets Rally"}, "web_url": "https://www.nytimes.com/2021/06/01/markets.html"},
                    {"headline": {"main": "No Link"}},
                    {"headline": {"print_headline": "x"}, "web_url": "https://www.nytimes.com/b.html"}
                ]
            }
        })
        .to_string();

        let results = extract(&body);
        assert_eq!(
            results[0],
            Ok(ListingRecord::new(
                "Markets Rally",
                "https://www.nytimes.com/2021/06/01/markets.html",
                Label::NotSarcastic
            ))
        );
        assert_eq!(
            results[1],
            Err(ExtractionError::MissingAttribute {
                index: 1,
                attribute: "web_url"
            })
        );
        assert_eq!(
            results[2],
            Err(ExtractionError::MissingAttribute {
                index: 2,
                attribute: "headline.main"
            })
        );
    }

    #[test]
    fn test_extract_caps_month() {
        let docs: Vec<_> = (0..MAX_DOCS_PER_MONTH + 20)
            .map(|i| json!({"headline": {"main": format!("Story {}", i)}, "web_url": format!("https://n/{}", i)}))
            .collect();
        let body = json!({"response": {"docs": docs}}).to_string();
        assert_eq!(extract(&body).len(), MAX_DOCS_PER_MONTH);
    }

    #[test]
    fn test_extract_rejects_unexpected_shape() {
        let results = extract(r#"{"fault": "rate limited"}"#);
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(ExtractionError::Page(_))));
    }
}
