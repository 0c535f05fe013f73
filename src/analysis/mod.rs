//! Exploratory analysis and reporting.
//!
//! ## Modules
//!
//! - [`frequency`] — top-K frequency ranking
//! - [`engine`] — per-dataset orchestration
//! - [`models`] — `Report`, `DatasetReport`, `DatasetOutcome`, `DatasetAnalysis`

pub mod engine;
pub mod frequency;
pub mod models;

pub use engine::{analyze_dataset, analyze_table};
pub use frequency::top_k;
pub use models::{DatasetAnalysis, DatasetOutcome, DatasetReport, Renderings, Report};

use serde::Deserialize;

use crate::graph::{AnalyticsConfig, BuildOptions, GraphMode};

/// Analysis configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rows in the mention and hashtag tables
    pub top_k: usize,
    /// Rows in the centrality rankings
    pub centrality_top_k: usize,
    pub graph_mode: GraphMode,
    /// Add retweet/reply interactions on top of mentions
    pub typed_edges: bool,
    pub louvain_resolution: f64,
    pub louvain_max_levels: usize,
    /// `None` (YAML `null`) draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            centrality_top_k: 10,
            graph_mode: GraphMode::Directed,
            typed_edges: true,
            louvain_resolution: 1.0,
            louvain_max_levels: 10,
            seed: Some(42),
        }
    }
}

impl AnalysisConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            mode: self.graph_mode,
            typed_edges: self.typed_edges,
        }
    }

    pub fn analytics(&self) -> AnalyticsConfig {
        AnalyticsConfig {
            louvain_resolution: self.louvain_resolution,
            louvain_max_levels: self.louvain_max_levels,
            seed: self.seed,
            ..AnalyticsConfig::default()
        }
    }
}
