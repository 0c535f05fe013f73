//! Line-delimited JSON loader.
//!
//! Reads the whole file, decodes it with the detected encoding, and parses
//! each line as an independent JSON object. Lines that fail to parse are
//! skipped with a warning; blank lines are ignored.

use serde_json::Value;
use std::path::Path;

use super::encoding::decode_bytes;
use super::models::{LoadStats, LoadedDataset, Post};
use super::IngestError;

/// Number of rows shown by [`preview`].
const PREVIEW_ROWS: usize = 5;

/// Load a line-delimited JSON archive from disk.
pub fn load_json_lines(path: &Path) -> Result<LoadedDataset, IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode_bytes(&bytes);
    tracing::debug!(
        "Decoded {} ({} bytes) as {}",
        path.display(),
        bytes.len(),
        decoded.encoding
    );
    if decoded.had_errors {
        tracing::warn!(
            "Malformed {} sequences in {} were replaced",
            decoded.encoding,
            path.display()
        );
    }

    let mut dataset = parse_json_lines(&decoded.text, &path.display().to_string());
    dataset.stats.encoding = decoded.encoding.to_string();
    dataset.stats.had_decode_errors = decoded.had_errors;
    Ok(dataset)
}

/// Parse already-decoded text, one JSON object per line.
///
/// `origin` only labels warnings.
pub fn parse_json_lines(text: &str, origin: &str) -> LoadedDataset {
    let mut posts = Vec::new();
    let mut stats = LoadStats::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        stats.lines_read += 1;

        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(row)) => posts.push(Post::from_object(line_no, &row)),
            Ok(_) => {
                tracing::warn!(
                    "Skipped line {} in {}: not a JSON object",
                    line_no,
                    origin
                );
                stats.lines_skipped += 1;
            }
            Err(e) => {
                tracing::warn!(
                    "Skipped line {} in {}: JSON decode error: {}",
                    line_no,
                    origin,
                    e
                );
                stats.lines_skipped += 1;
            }
        }
    }

    LoadedDataset { posts, stats }
}

/// Log a short preview of a freshly loaded dataset, or warn if it is empty.
pub fn preview(dataset: &LoadedDataset, name: &str) {
    if dataset.is_empty() {
        tracing::warn!("{} is empty after loading", name);
        return;
    }

    tracing::debug!("First {} rows of {}:", PREVIEW_ROWS, name);
    for post in dataset.posts.iter().take(PREVIEW_ROWS) {
        tracing::debug!(
            "  line {:>5} | @{} | {}: {}",
            post.line,
            post.author.as_deref().unwrap_or("?"),
            post.text_source,
            post.text
        );
    }
}
