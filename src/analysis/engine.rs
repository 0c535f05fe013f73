//! Per-dataset pipeline: load → preprocess → extract → graph → analytics.

use anyhow::{Context, Result};
use std::path::Path;

use super::frequency::{frequencies, top_k};
use super::models::{DatasetAnalysis, DatasetOutcome, DatasetReport};
use super::AnalysisConfig;
use crate::graph::{build_interaction_graph, compute_all};
use crate::ingest::{load_json_lines, preview, LoadStats};
use crate::render::{render_dataset, RenderConfig};
use crate::text::{extract_all, preprocess, RecordTable};

/// Run the whole pipeline for one file.
///
/// An empty file or one without any text field is reported through
/// [`DatasetOutcome`]; only an unreadable file is an error.
pub fn analyze_dataset(
    name: &str,
    path: &Path,
    analysis: &AnalysisConfig,
    render: &RenderConfig,
) -> Result<DatasetReport> {
    tracing::info!("Loading {} from {}", name, path.display());
    let dataset = load_json_lines(path).with_context(|| format!("loading dataset {}", name))?;
    preview(&dataset, name);

    let report = |outcome| DatasetReport {
        name: name.to_string(),
        path: path.to_path_buf(),
        outcome,
    };

    if dataset.is_empty() {
        return Ok(report(DatasetOutcome::Empty {
            load: dataset.stats,
        }));
    }

    let load = dataset.stats.clone();
    let Some(mut table) = preprocess(dataset) else {
        tracing::warn!("{}: no suitable text field, skipping analysis", name);
        return Ok(report(DatasetOutcome::MissingTextField { load }));
    };
    extract_all(&mut table);

    let renders = render.enabled.then_some(render);
    let analysis = analyze_table(name, &table, load, analysis, renders);
    Ok(report(DatasetOutcome::Analyzed(Box::new(analysis))))
}

/// Exploratory counts, graph construction and graph analytics over a
/// preprocessed table. Renders only when `render` is given.
pub fn analyze_table(
    name: &str,
    table: &RecordTable,
    load: LoadStats,
    config: &AnalysisConfig,
    render: Option<&RenderConfig>,
) -> DatasetAnalysis {
    let mentions = table.records.iter().flat_map(|r| r.mentions());
    let hashtags = table.records.iter().flat_map(|r| r.hashtags());
    let top_mentions = top_k(mentions, config.top_k);
    let all_hashtags = frequencies(hashtags);
    let top_hashtags: Vec<(String, usize)> =
        all_hashtags.iter().take(config.top_k).cloned().collect();

    let retweet_count = table.records.iter().filter(|r| r.is_retweet()).count();
    let reply_count = table.records.iter().filter(|r| r.is_reply()).count();

    tracing::info!(
        "{}: {} posts, {} unique authors, {} retweets, {} replies",
        name,
        table.len(),
        table.unique_authors(),
        retweet_count,
        reply_count
    );

    let graph = build_interaction_graph(&table.records, &config.build_options());
    let analytics = compute_all(&graph, &config.analytics());

    tracing::info!(
        "{}: graph with {} users and {} edges, {} communities ({}ms)",
        name,
        analytics.metrics.node_count,
        analytics.metrics.edge_count,
        analytics.communities.len(),
        analytics.computation_ms
    );

    let renderings = render.map(|render| {
        render_dataset(name, &all_hashtags, &graph, &analytics, render, config.seed)
    });

    DatasetAnalysis {
        load,
        post_count: table.len(),
        duplicates_removed: table.duplicates_removed,
        blanks_removed: table.blanks_removed,
        unique_authors: table.unique_authors(),
        retweet_count,
        reply_count,
        top_mentions,
        top_hashtags,
        top_degree: analytics
            .degree_centrality
            .iter()
            .take(config.centrality_top_k)
            .cloned()
            .collect(),
        top_betweenness: analytics
            .betweenness
            .iter()
            .take(config.centrality_top_k)
            .cloned()
            .collect(),
        graph: analytics,
        renderings,
    }
}
