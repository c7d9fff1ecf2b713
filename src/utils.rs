//! Utility functions for text cleanup, logging and file system checks.

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Collapse every run of whitespace to a single space and trim the ends.
///
/// Headline text pulled out of markup often spans several lines; records are
/// line-oriented, so no extracted field may keep a newline.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_whitespace("  Man\n   Bites\tDog "), "Man Bites Dog");
/// ```
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop trailing `/` characters from a link.
pub fn strip_trailing_slash(link: &str) -> &str {
    link.trim_end_matches('/')
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the nearest character boundary below `max` bytes
/// and suffixed with the number of bytes dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the output directory exists and accepts new files.
///
/// Creates the directory if needed, then creates and removes a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe = path.join(".headline_crawler_probe");
    fs::write(&probe, b"").await?;
    fs::remove_file(&probe).await?;
    info!("Output directory is writable");
    Ok(())
}
