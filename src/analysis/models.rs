//! Report data models.
//!
//! - [`Report`] — one run over all configured datasets
//! - [`DatasetReport`] / [`DatasetOutcome`] — result for one dataset
//! - [`DatasetAnalysis`] — everything computed for a non-empty dataset
//! - [`Renderings`] — optional SVG documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::graph::{CentralityEntry, GraphAnalytics};
use crate::ingest::LoadStats;

/// Rendered images for one dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Renderings {
    /// Hashtag word cloud; `None` when the dataset has no hashtags
    pub wordcloud_svg: Option<String>,
    /// Community-coloured interaction graph; `None` for an empty graph
    pub graph_svg: Option<String>,
}

/// Everything computed for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub load: LoadStats,
    /// Posts left after dedup and blank removal
    pub post_count: usize,
    pub duplicates_removed: usize,
    pub blanks_removed: usize,
    pub unique_authors: usize,
    pub retweet_count: usize,
    pub reply_count: usize,
    pub top_mentions: Vec<(String, usize)>,
    pub top_hashtags: Vec<(String, usize)>,
    pub graph: GraphAnalytics,
    /// Leading rows of `graph.degree_centrality`
    pub top_degree: Vec<CentralityEntry>,
    /// Leading rows of `graph.betweenness`
    pub top_betweenness: Vec<CentralityEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderings: Option<Renderings>,
}

/// How processing of a dataset ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DatasetOutcome {
    /// Nothing usable after load
    Empty { load: LoadStats },
    /// No post carries `rawContent` or `text`
    MissingTextField { load: LoadStats },
    Analyzed(Box<DatasetAnalysis>),
}

impl DatasetOutcome {
    pub fn analysis(&self) -> Option<&DatasetAnalysis> {
        match self {
            Self::Analyzed(analysis) => Some(analysis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    pub name: String,
    pub path: PathBuf,
    pub outcome: DatasetOutcome,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub computed_at: DateTime<Utc>,
    pub datasets: Vec<DatasetReport>,
}

impl Report {
    pub fn dataset(&self, name: &str) -> Option<&DatasetReport> {
        self.datasets.iter().find(|d| d.name == name)
    }
}

// ============================================================================
// Console tables
// ============================================================================

/// Largest communities listed in the console report.
const COMMUNITY_ROWS: usize = 10;

fn write_counts(f: &mut fmt::Formatter<'_>, title: &str, rows: &[(String, usize)]) -> fmt::Result {
    writeln!(f, "{}:", title)?;
    if rows.is_empty() {
        return writeln!(f, "  (none)");
    }
    for (item, count) in rows {
        writeln!(f, "  {:<30} {:>6}", item, count)?;
    }
    Ok(())
}

fn write_ranking(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    rows: &[CentralityEntry],
) -> fmt::Result {
    writeln!(f, "{}:", title)?;
    if rows.is_empty() {
        return writeln!(f, "  (none)");
    }
    for (rank, entry) in rows.iter().enumerate() {
        writeln!(f, "  {:>3}. {:<30} {:.4}", rank + 1, entry.handle, entry.score)?;
    }
    Ok(())
}

impl fmt::Display for DatasetAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Lines read: {} (skipped {}, encoding {})",
            self.load.lines_read, self.load.lines_skipped, self.load.encoding
        )?;
        writeln!(
            f,
            "Posts: {} ({} duplicates, {} blank removed)",
            self.post_count, self.duplicates_removed, self.blanks_removed
        )?;
        writeln!(f, "Unique authors: {}", self.unique_authors)?;
        writeln!(f, "Retweets: {}  Replies: {}", self.retweet_count, self.reply_count)?;
        write_counts(f, "Top mentions", &self.top_mentions)?;
        write_counts(f, "Top hashtags", &self.top_hashtags)?;

        let m = &self.graph.metrics;
        writeln!(f, "Graph ({}): {} users, {} edges", m.mode, m.node_count, m.edge_count)?;
        writeln!(f, "  Density:             {:.6}", m.density)?;
        writeln!(f, "  Diameter:            {}", m.diameter)?;
        writeln!(f, "  Average clustering:  {:.6}", m.average_clustering)?;
        writeln!(f, "  Components:          {}", m.component_count)?;
        writeln!(
            f,
            "  Communities:         {} (modularity {:.4})",
            self.graph.communities.len(),
            self.graph.modularity
        )?;
        for community in self.graph.communities.iter().take(COMMUNITY_ROWS) {
            writeln!(
                f,
                "    #{:<4} {:>5} users  led by {}",
                community.id, community.size, community.label
            )?;
        }
        write_ranking(f, "Degree centrality", &self.top_degree)?;
        write_ranking(f, "Betweenness centrality", &self.top_betweenness)
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ({}) ===", self.name, self.path.display())?;
        match &self.outcome {
            DatasetOutcome::Empty { .. } => writeln!(f, "Dataset is empty after load"),
            DatasetOutcome::MissingTextField { .. } => {
                writeln!(f, "No suitable text field (rawContent or text) found")
            }
            DatasetOutcome::Analyzed(analysis) => write!(f, "{}", analysis),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report computed at {}", self.computed_at.to_rfc3339())?;
        for dataset in &self.datasets {
            writeln!(f)?;
            write!(f, "{}", dataset)?;
        }
        Ok(())
    }
}
