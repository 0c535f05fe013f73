//! Interaction signals derived from cleaned text.
//!
//! Retweet and reply detection are independent prefix checks and are never
//! reconciled with each other. They misfire on ambiguous input: a retweet of
//! a reply (`rt @a @b …`) is flagged only as a retweet, and a reply quoting
//! `rt @…` mid-text only as a reply. Both flags are reported as computed.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::cleaner::CleanText;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("mention pattern is valid"));

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("hashtag pattern is valid"));

/// Interaction signals for one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactions {
    /// `@handle` tokens in order of appearance, duplicates kept
    pub mentions: Vec<String>,
    /// `#tag` tokens in order of appearance, duplicates kept
    pub hashtags: Vec<String>,
    pub is_retweet: bool,
    pub is_reply: bool,
}

impl Interactions {
    /// Target of a retweet/reply: the first mention, without its `@`.
    pub fn first_mentioned_handle(&self) -> Option<&str> {
        self.mentions.first().map(|m| handle_of(m))
    }
}

/// Strip the leading `@` from a mention token.
pub fn handle_of(mention: &str) -> &str {
    mention.trim_start_matches('@')
}

pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn is_retweet(text: &str) -> bool {
    text.starts_with("rt @")
}

pub fn is_reply(text: &str) -> bool {
    text.starts_with('@')
}

/// Derive all signals from a cleaned value. Non-textual values yield none.
pub fn extract_interactions(cleaned: &CleanText) -> Interactions {
    match cleaned.as_text() {
        Some(text) => Interactions {
            mentions: extract_mentions(text),
            hashtags: extract_hashtags(text),
            is_retweet: is_retweet(text),
            is_reply: is_reply(text),
        },
        None => Interactions::default(),
    }
}
