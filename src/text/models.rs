//! The enriched post table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cleaner::CleanText;
use super::interactions::Interactions;
use crate::ingest::{Post, TextSource};

/// A post after preprocessing and interaction extraction.
///
/// Never mutated once analysis starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// 1-based line in the source file
    pub line: usize,
    /// Lower-cased author handle, if resolvable
    pub author: Option<String>,
    /// Text as found in the archive
    pub raw_text: Value,
    pub text_source: TextSource,
    /// Normalized text
    pub cleaned: CleanText,
    /// Empty until [`crate::text::extract_all`] runs
    pub interactions: Interactions,
}

impl Record {
    pub fn from_post(post: Post, cleaned: CleanText) -> Self {
        Self {
            line: post.line,
            author: post.author,
            raw_text: post.text,
            text_source: post.text_source,
            cleaned,
            interactions: Interactions::default(),
        }
    }

    pub fn mentions(&self) -> &[String] {
        &self.interactions.mentions
    }

    pub fn hashtags(&self) -> &[String] {
        &self.interactions.hashtags
    }

    pub fn is_retweet(&self) -> bool {
        self.interactions.is_retweet
    }

    pub fn is_reply(&self) -> bool {
        self.interactions.is_reply
    }
}

/// Output of the preprocessor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordTable {
    pub records: Vec<Record>,
    /// Posts dropped because their cleaned text repeated an earlier one
    pub duplicates_removed: usize,
    /// Posts dropped because nothing survived cleaning
    pub blanks_removed: usize,
}

impl RecordTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct resolvable authors.
    pub fn unique_authors(&self) -> usize {
        self.records
            .iter()
            .filter_map(|r| r.author.as_deref())
            .collect::<std::collections::HashSet<_>>()
            .len()
    }
}
