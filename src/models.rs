//! Data model for extracted listing records.
//!
//! A [`ListingRecord`] is one headline found on a listing page together with
//! the article link and the label of the source it came from. Records are
//! written out as soon as they are extracted and are never updated.
//!
//! # Line format
//!
//! ```text
//! headline|url|label
//! ```
//!
//! `|` and `\` inside a field are written as `\|` and `\\`. Fields without
//! either character are written verbatim.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed sarcasm label of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    NotSarcastic = 0,
    Sarcastic = 1,
}

impl Label {
    pub fn as_digit(self) -> char {
        match self {
            Label::NotSarcastic => '0',
            Label::Sarcastic => '1',
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_digit())
    }
}

/// One extracted listing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    /// Headline text, whitespace-normalized.
    pub headline: String,
    /// Absolute article URL.
    pub url: String,
    /// Label of the source the item came from.
    pub label: Label,
}

impl ListingRecord {
    pub fn new(headline: impl Into<String>, url: impl Into<String>, label: Label) -> Self {
        Self {
            headline: headline.into(),
            url: url.into(),
            label,
        }
    }

    /// Serialize to a single output line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{}|{}|{}",
            escape_field(&self.headline),
            escape_field(&self.url),
            self.label
        )
    }
}

/// Why a stored line could not be read back as a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseRecordError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),
    #[error("unknown label `{0}`")]
    Label(String),
}

impl FromStr for ListingRecord {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\n', '\r']);
        let fields = split_fields(line);
        let [headline, url, label] = <[String; 3]>::try_from(fields)
            .map_err(|fields: Vec<String>| ParseRecordError::FieldCount(fields.len()))?;

        let label = match label.as_str() {
            "0" => Label::NotSarcastic,
            "1" => Label::Sarcastic,
            other => return Err(ParseRecordError::Label(other.to_string())),
        };

        Ok(ListingRecord {
            headline,
            url,
            label,
        })
    }
}

fn escape_field(field: &str) -> String {
    if !field.contains(['|', '\\']) {
        return field.to_string();
    }
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c == '|' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(3);
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            '|' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
