//! Ingestion data models.
//!
//! - [`Post`] — one archived post, decoded from a JSON object with every field optional
//! - [`TextSource`] — which field the post's text was taken from
//! - [`LoadStats`] / [`LoadedDataset`] — what the loader read and skipped

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field that supplied a post's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// `rawContent` (scraper archives)
    RawContent,
    /// `text` (API v1 style archives)
    Text,
    /// Neither field was usable; the text is a JSON dump of the whole row
    Synthesized,
}

impl std::fmt::Display for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RawContent => write!(f, "rawContent"),
            Self::Text => write!(f, "text"),
            Self::Synthesized => write!(f, "synthesized"),
        }
    }
}

/// One ingested post.
///
/// Decoded defensively: nothing about the row's shape is enforced, every
/// field of interest is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// 1-based line number in the source file
    pub line: usize,
    /// Author handle, lower-cased (`user.username`, or `user` when it is a plain string)
    pub author: Option<String>,
    /// Text value, kept as raw JSON because archives are not guaranteed to store a string
    pub text: Value,
    /// Field the text came from
    pub text_source: TextSource,
    /// Whether the row carried a `rawContent` or `text` key at all (even if null)
    pub has_text_field: bool,
}

impl Post {
    /// Decode a post from a parsed JSON object.
    ///
    /// Text resolution order: `rawContent` → `text` → JSON dump of the row.
    /// Null values fall through to the next candidate.
    pub fn from_object(line: usize, row: &Map<String, Value>) -> Self {
        let has_text_field = row.contains_key("rawContent") || row.contains_key("text");

        let (text, text_source) = match (non_null(row, "rawContent"), non_null(row, "text")) {
            (Some(raw), _) => (raw.clone(), TextSource::RawContent),
            (None, Some(text)) => (text.clone(), TextSource::Text),
            (None, None) => (
                Value::String(Value::Object(row.clone()).to_string()),
                TextSource::Synthesized,
            ),
        };

        Self {
            line,
            author: author_handle(row),
            text,
            text_source,
            has_text_field,
        }
    }
}

fn non_null<'a>(row: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    row.get(key).filter(|v| !v.is_null())
}

/// Resolve the author handle from `user`.
///
/// Accepts `{"user": {"username": "..."}}` and `{"user": "..."}`. A leading
/// `@` is dropped and the handle is lower-cased.
fn author_handle(row: &Map<String, Value>) -> Option<String> {
    let raw = match row.get("user")? {
        Value::Object(user) => user.get("username")?.as_str()?,
        Value::String(name) => name.as_str(),
        _ => return None,
    };

    let handle = raw.trim().trim_start_matches('@').to_lowercase();
    if handle.is_empty() {
        None
    } else {
        Some(handle)
    }
}

/// Counters collected while reading one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Non-blank lines seen
    pub lines_read: usize,
    /// Lines that were not a JSON object and were skipped
    pub lines_skipped: usize,
    /// Detected encoding name
    pub encoding: String,
    /// Whether the decoder had to replace malformed byte sequences
    pub had_decode_errors: bool,
}

/// Output of the loader: the post table plus read statistics.
#[derive(Debug, Clone, Default)]
pub struct LoadedDataset {
    pub posts: Vec<Post>,
    pub stats: LoadStats,
}

impl LoadedDataset {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Whether any post carried a `rawContent` or `text` key.
    pub fn has_text_field(&self) -> bool {
        self.posts.iter().any(|p| p.has_text_field)
    }
}
