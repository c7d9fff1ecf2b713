//! Failure classes of a crawl.
//!
//! None of these stop a crawl: the engine logs them against the target being
//! processed and moves on.

use thiserror::Error;

/// A target could not be turned into a usable response body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source cannot address this target (wrong target kind, missing API key).
    #[error("cannot build request for {target}: {reason}")]
    Target { target: String, reason: String },

    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// The fetched document did not have the structure a source expects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A listing item lacks an element the source reads from.
    #[error("item {index}: missing element `{selector}`")]
    MissingElement { index: usize, selector: &'static str },

    /// A listing item lacks an attribute the source reads from.
    #[error("item {index}: missing attribute `{attribute}`")]
    MissingAttribute {
        index: usize,
        attribute: &'static str,
    },

    /// A listing item produced an empty headline.
    #[error("item {index}: empty headline")]
    EmptyHeadline { index: usize },

    /// A link could not be resolved to an absolute URL.
    #[error("item {index}: invalid link `{href}`")]
    InvalidLink { index: usize, href: String },

    /// The page itself is missing the listing container or is not parseable.
    #[error("malformed page: {0}")]
    Page(String),
}

/// The output file could not be opened or written.
#[derive(Debug, Error)]
#[error("failed to append to {path}: {source}")]
pub struct PersistError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_messages() {
        let missing = ExtractionError::MissingAttribute {
            index: 2,
            attribute: "href",
        };
        assert_eq!(missing.to_string(), "item 2: missing attribute `href`");

        let page = ExtractionError::Page("no sitemap list".to_string());
        assert_eq!(page.to_string(), "malformed page: no sitemap list");
    }

    #[test]
    fn test_persist_error_keeps_path() {
        let err = PersistError {
            path: "/tmp/out.txt".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().starts_with("failed to append to /tmp/out.txt"));
    }
}
