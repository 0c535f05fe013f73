//! Record table → interaction graph.
//!
//! One pass over the records. Every mention of a record with a resolvable
//! author yields an `author → mentioned` interaction. With typed edges on,
//! a retweet or reply additionally yields a `RETWEET` / `REPLY` interaction
//! towards the *first* mentioned handle.

use serde::{Deserialize, Serialize};

use super::models::{GraphMode, InteractionGraph, InteractionKind};
use crate::text::{handle_of, Record};

/// Edge policy for [`build_interaction_graph`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuildOptions {
    pub mode: GraphMode,
    /// Record retweet/reply interactions in addition to plain mentions
    pub typed_edges: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            mode: GraphMode::Directed,
            typed_edges: true,
        }
    }
}

/// Build the who-interacts-with-whom graph.
///
/// Records without an author contribute nothing; users only appear as
/// endpoints of at least one interaction.
pub fn build_interaction_graph(records: &[Record], options: &BuildOptions) -> InteractionGraph {
    let mention_count: usize = records.iter().map(|r| r.mentions().len()).sum();
    let mut graph = InteractionGraph::with_capacity(options.mode, mention_count, mention_count);
    let mut authorless = 0usize;

    for record in records {
        let Some(author) = record.author.as_deref() else {
            if !record.mentions().is_empty() {
                authorless += 1;
            }
            continue;
        };

        for mention in record.mentions() {
            graph.add_interaction(author, handle_of(mention), InteractionKind::Mention);
        }

        if !options.typed_edges {
            continue;
        }

        if let Some(target) = record.interactions.first_mentioned_handle() {
            if record.is_retweet() {
                graph.add_interaction(author, target, InteractionKind::Retweet);
            }
            if record.is_reply() {
                graph.add_interaction(author, target, InteractionKind::Reply);
            }
        }
    }

    if authorless > 0 {
        tracing::debug!(
            "{} records with mentions had no resolvable author and were left out of the graph",
            authorless
        );
    }
    tracing::debug!(
        "Built {} interaction graph: {} users, {} edges",
        options.mode,
        graph.node_count(),
        graph.edge_count()
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{Post, TextSource};
    use crate::text::{clean_value, extract_interactions};
    use serde_json::json;

    fn record(author: Option<&str>, text: &str) -> Record {
        let post = Post {
            line: 1,
            author: author.map(str::to_string),
            text: json!(text),
            text_source: TextSource::RawContent,
            has_text_field: true,
        };
        let cleaned = clean_value(&post.text);
        let mut record = Record::from_post(post, cleaned);
        record.interactions = extract_interactions(&record.cleaned);
        record
    }

    #[test]
    fn test_mutual_mentions_directed() {
        let records = vec![record(Some("u1"), "hola @u2"), record(Some("u2"), "hola @u1")];
        let g = build_interaction_graph(&records, &BuildOptions::default());

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_between("u1", "u2").unwrap().mentions, 1);
        assert_eq!(g.edge_between("u2", "u1").unwrap().mentions, 1);
    }

    #[test]
    fn test_mutual_mentions_undirected() {
        let records = vec![record(Some("u1"), "hola @u2"), record(Some("u2"), "hola @u1")];
        let options = BuildOptions {
            mode: GraphMode::Undirected,
            typed_edges: true,
        };
        let g = build_interaction_graph(&records, &options);

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        let edge = g.edge_between("u1", "u2").unwrap();
        assert_eq!(edge.mentions, 2);
        assert!((edge.weight - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retweet_adds_typed_interaction_to_first_mention() {
        let records = vec![record(Some("fan"), "RT @star: hi @other")];
        let g = build_interaction_graph(&records, &BuildOptions::default());

        let to_star = g.edge_between("fan", "star").unwrap();
        assert_eq!(to_star.mentions, 1);
        assert_eq!(to_star.retweets, 1);
        assert_eq!(to_star.replies, 0);

        let to_other = g.edge_between("fan", "other").unwrap();
        assert_eq!(to_other.mentions, 1);
        assert_eq!(to_other.retweets, 0);
    }

    #[test]
    fn test_reply_adds_typed_interaction() {
        let records = vec![record(Some("a"), "@b gracias")];
        let g = build_interaction_graph(&records, &BuildOptions::default());
        let edge = g.edge_between("a", "b").unwrap();
        assert_eq!(edge.replies, 1);
        assert_eq!(edge.total(), 2);
    }

    #[test]
    fn test_untyped_edges_only_count_mentions() {
        let records = vec![record(Some("a"), "@b gracias"), record(Some("a"), "rt @b ok")];
        let options = BuildOptions {
            mode: GraphMode::Directed,
            typed_edges: false,
        };
        let g = build_interaction_graph(&records, &options);
        let edge = g.edge_between("a", "b").unwrap();
        assert_eq!(edge.mentions, 2);
        assert_eq!(edge.retweets + edge.replies, 0);
    }

    #[test]
    fn test_records_without_author_are_skipped() {
        let records = vec![record(None, "@x @y"), record(Some("z"), "no mentions")];
        let g = build_interaction_graph(&records, &BuildOptions::default());
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_repeated_mentions_accumulate() {
        let records = vec![record(Some("a"), "@b @b @b")];
        let g = build_interaction_graph(&records, &BuildOptions::default());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_between("a", "b").unwrap().mentions, 3);
    }
}
