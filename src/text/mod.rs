//! Text processing: cleaning, deduplication and interaction extraction.
//!
//! ## Modules
//!
//! - [`cleaner`] — `clean_text` / `clean_value` normalization
//! - [`preprocess`] — dedup + blank removal, then per-record enrichment
//! - [`interactions`] — mentions, hashtags, retweet/reply flags
//! - [`models`] — `Record`, `RecordTable`

pub mod cleaner;
pub mod interactions;
pub mod models;
pub mod preprocess;

pub use cleaner::{clean_text, clean_value, CleanText};
pub use interactions::{extract_interactions, handle_of, Interactions};
pub use models::{Record, RecordTable};
pub use preprocess::{extract_all, preprocess};
