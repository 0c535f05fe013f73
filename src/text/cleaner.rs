//! Post text normalization.
//!
//! Lower-cases, removes URL-like tokens and strips every character except
//! word characters, whitespace, `@` and `#`. The URL pass runs again after
//! punctuation stripping so that `clean(clean(x)) == clean(x)` holds even for
//! inputs like `ht.tp…` that only become URL-shaped once the dots are gone.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("URL pattern is valid"));

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s@#]").expect("punctuation pattern is valid"));

/// Result of cleaning an arbitrary JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CleanText {
    /// Non-blank cleaned text
    Text(String),
    /// The input was textual but nothing but whitespace survived cleaning
    Blank,
    /// The input was not a string and is returned untouched
    Passthrough(Value),
}

impl CleanText {
    /// The cleaned string, if this is textual and non-blank.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

/// Clean one string. Returns `None` when the result is blank.
///
/// The surviving text is not trimmed.
pub fn clean_text(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let without_urls = URL_RE.replace_all(&lowered, "");
    let stripped = NON_WORD_RE.replace_all(&without_urls, "");
    let cleaned = URL_RE.replace_all(&stripped, "");

    if cleaned.trim().is_empty() {
        None
    } else {
        Some(cleaned.into_owned())
    }
}

/// Clean an arbitrary value: strings are cleaned, anything else passes through.
pub fn clean_value(value: &Value) -> CleanText {
    match value {
        Value::String(text) => match clean_text(text) {
            Some(cleaned) => CleanText::Text(cleaned),
            None => CleanText::Blank,
        },
        other => CleanText::Passthrough(other.clone()),
    }
}
