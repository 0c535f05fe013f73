//! Archive ingestion.
//!
//! Turns a line-delimited JSON file into a table of [`Post`]s:
//!
//! ```text
//! bytes ──► encoding (BOM / chardetng) ──► lines ──► serde_json ──► Post
//! ```
//!
//! ## Modules
//!
//! - [`encoding`] — encoding detection and decoding
//! - [`loader`] — line parsing with skip-and-warn on malformed lines
//! - [`models`] — `Post`, `TextSource`, `LoadStats`, `LoadedDataset`

pub mod encoding;
pub mod loader;
pub mod models;

pub use loader::{load_json_lines, parse_json_lines, preview};
pub use models::{LoadStats, LoadedDataset, Post, TextSource};

use std::path::PathBuf;

/// Errors raised at the file boundary.
///
/// Malformed lines are not errors; they are counted in [`LoadStats`].
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
