//! Output writers for extracted records.
//!
//! # Submodules
//!
//! - [`text`]: Appends pipe-delimited record lines to a per-source text file
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── the_onion.txt
//! ├── huffpost_data.txt
//! └── theguardian.com.txt
//! ```
//!
//! Files are only ever appended to. Rerunning a crawl over the same range
//! appends the same records again.

pub mod text;
