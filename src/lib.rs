//! Tweetnet
//!
//! Interaction-graph analytics for line-delimited JSON post archives:
//! - Encoding-aware loading that skips malformed lines
//! - Text cleaning, deduplication, mention/hashtag/retweet/reply extraction
//! - A who-interacts-with-whom graph built on petgraph
//! - Frequency tables, graph metrics, Louvain communities and centrality
//! - Optional SVG word clouds and graph drawings

pub mod analysis;
pub mod graph;
pub mod ingest;
pub mod render;
pub mod text;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use analysis::{AnalysisConfig, DatasetOutcome, DatasetReport, Report};
pub use render::RenderConfig;

use graph::GraphMode;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// One input file and the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    pub path: PathBuf,
}

impl DatasetConfig {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Parse a `name=path` pair.
    pub fn parse(spec: &str) -> Result<Self> {
        let Some((name, path)) = spec.split_once('=') else {
            bail!("expected NAME=PATH, got {:?}", spec);
        };
        let (name, path) = (name.trim(), path.trim());
        if name.is_empty() || path.is_empty() {
            bail!("expected NAME=PATH, got {:?}", spec);
        }
        Ok(Self::new(name, path))
    }
}

fn default_datasets() -> Vec<DatasetConfig> {
    vec![
        DatasetConfig::new("TráficoGT", "traficogt.txt"),
        DatasetConfig::new("Tioberny", "tioberny.txt"),
    ]
}

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YamlConfig {
    pub datasets: Vec<DatasetConfig>,
    pub analysis: AnalysisConfig,
    pub render: RenderConfig,
}

impl Default for YamlConfig {
    fn default() -> Self {
        Self {
            datasets: default_datasets(),
            analysis: AnalysisConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

// ============================================================================
// Runtime config (what the pipeline actually uses)
// ============================================================================

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub datasets: Vec<DatasetConfig>,
    pub analysis: AnalysisConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let yaml = YamlConfig::default();
        Self {
            datasets: yaml.datasets,
            analysis: yaml.analysis,
            render: yaml.render,
        }
    }
}

impl Config {
    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "tweetnet.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        // 1. Load YAML config (or defaults if file not found)
        let yaml = Self::load_yaml(yaml_path);
        let mut analysis = yaml.analysis;
        let mut render = yaml.render;

        // 2. Env var overrides
        let datasets = match std::env::var("TWEETNET_DATASETS") {
            Ok(list) => list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(DatasetConfig::parse)
                .collect::<Result<Vec<_>>>()
                .context("invalid TWEETNET_DATASETS")?,
            Err(_) => yaml.datasets,
        };
        if let Some(top_k) = std::env::var("TWEETNET_TOP_K")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            analysis.top_k = top_k;
        }
        if let Ok(mode) = std::env::var("TWEETNET_GRAPH_MODE") {
            analysis.graph_mode = mode
                .parse::<GraphMode>()
                .map_err(|e| anyhow!("invalid TWEETNET_GRAPH_MODE: {}", e))?;
        }
        if let Ok(seed) = std::env::var("TWEETNET_SEED") {
            analysis.seed = match seed.trim() {
                "" | "none" => None,
                s => Some(s.parse::<u64>().context("invalid TWEETNET_SEED")?),
            };
        }
        if let Ok(dir) = std::env::var("TWEETNET_OUTPUT_DIR") {
            render.output_dir = Some(PathBuf::from(dir));
        }

        Ok(Self {
            datasets,
            analysis,
            render,
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("tweetnet.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

// ============================================================================
// Pipeline entry point
// ============================================================================

/// Analyze every configured dataset, in order.
///
/// Empty datasets and datasets without a text field are reported in the
/// returned [`Report`]; an unreadable file aborts the run.
pub fn run(config: &Config) -> Result<Report> {
    let start = std::time::Instant::now();
    let mut datasets = Vec::with_capacity(config.datasets.len());

    for dataset in &config.datasets {
        let report = analysis::analyze_dataset(
            &dataset.name,
            &dataset.path,
            &config.analysis,
            &config.render,
        )?;
        datasets.push(report);
    }

    tracing::info!(
        "Analyzed {} datasets in {}ms",
        datasets.len(),
        start.elapsed().as_millis()
    );

    Ok(Report {
        computed_at: chrono::Utc::now(),
        datasets,
    })
}

// ============================================================================
// Tests
// ============================================================================
