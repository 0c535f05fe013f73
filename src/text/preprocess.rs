//! Preprocessing: clean every post, drop repeated and blank texts.

use serde_json::Value;
use std::collections::HashSet;

use super::cleaner::{clean_value, CleanText};
use super::interactions::extract_interactions;
use super::models::{Record, RecordTable};
use crate::ingest::LoadedDataset;

/// Clean and deduplicate a loaded dataset.
///
/// Returns `None` when no row carries a `rawContent` or `text` field; the
/// caller reports that the dataset cannot be analyzed. Duplicates are
/// detected on the cleaned value and the first occurrence is kept; blank
/// results are discarded afterwards.
pub fn preprocess(dataset: LoadedDataset) -> Option<RecordTable> {
    if !dataset.is_empty() && !dataset.has_text_field() {
        tracing::warn!("No suitable text field (rawContent or text) found in any post");
        return None;
    }

    let mut seen_text: HashSet<String> = HashSet::new();
    let mut seen_other: Vec<Value> = Vec::new();
    let mut seen_blank = false;

    let mut table = RecordTable::default();

    for post in dataset.posts {
        let cleaned = clean_value(&post.text);

        let first_occurrence = match &cleaned {
            CleanText::Text(text) => seen_text.insert(text.clone()),
            CleanText::Blank => !std::mem::replace(&mut seen_blank, true),
            CleanText::Passthrough(value) => {
                if seen_other.contains(value) {
                    false
                } else {
                    seen_other.push(value.clone());
                    true
                }
            }
        };

        if !first_occurrence {
            table.duplicates_removed += 1;
            continue;
        }
        if cleaned.is_blank() {
            table.blanks_removed += 1;
            continue;
        }

        table.records.push(Record::from_post(post, cleaned));
    }

    tracing::debug!(
        "Preprocessed {} posts ({} duplicates, {} blank removed)",
        table.records.len(),
        table.duplicates_removed,
        table.blanks_removed
    );

    Some(table)
}

/// Fill in mentions, hashtags and retweet/reply flags for every record.
pub fn extract_all(table: &mut RecordTable) {
    for record in &mut table.records {
        record.interactions = extract_interactions(&record.cleaned);
    }
}
