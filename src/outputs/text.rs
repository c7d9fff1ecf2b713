//! Pipe-delimited text output.
//!
//! Each record becomes one `headline|url|label` line (see
//! [`ListingRecord::to_line`]). The destination is opened in append mode and
//! created if missing; existing content is never read, truncated or checked.

use crate::errors::PersistError;
use crate::models::ListingRecord;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Append `records` to the file at `path`, one line each.
///
/// # Returns
///
/// The number of lines written. An empty batch writes nothing and does not
/// touch the file.
///
/// # Errors
///
/// Returns [`PersistError`] if the file cannot be opened or written. Lines
/// written before the failure stay in the file.
#[instrument(level = "debug", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn append_records(records: &[ListingRecord], path: &Path) -> Result<usize, PersistError> {
    if records.is_empty() {
        return Ok(0);
    }

    let mut buffer = String::new();
    for record in records {
        buffer.push_str(&record.to_line());
        buffer.push('\n');
    }

    let persist_err = |source| PersistError {
        path: path.display().to_string(),
        source,
    };

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(persist_err)?;
    file.write_all(buffer.as_bytes()).await.map_err(persist_err)?;
    file.flush().await.map_err(persist_err)?;

    debug!(bytes = buffer.len(), "Appended records");
    Ok(records.len())
}
