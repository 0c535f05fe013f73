//! Optional image output.
//!
//! ## Modules
//!
//! - [`wordcloud`] — hashtag word cloud
//! - [`layout`] — spring layout for the interaction graph
//! - [`svg`] — community-coloured graph drawing

pub mod layout;
pub mod svg;
pub mod wordcloud;

pub use layout::spring_layout;
pub use svg::render_graph;
pub use wordcloud::{render_wordcloud, WordCloudOptions};

use serde::Deserialize;
use std::path::PathBuf;

use crate::analysis::Renderings;
use crate::graph::{GraphAnalytics, InteractionGraph};

/// Render configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub enabled: bool,
    /// Where the CLI writes SVG files; `None` keeps them in the report only
    pub output_dir: Option<PathBuf>,
    pub wordcloud_width: u32,
    pub wordcloud_height: u32,
    pub wordcloud_max_words: usize,
    pub graph_size: u32,
    /// Optimal node distance for the spring layout
    pub layout_k: f64,
    pub layout_iterations: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output_dir: None,
            wordcloud_width: 800,
            wordcloud_height: 400,
            wordcloud_max_words: 200,
            graph_size: 1000,
            layout_k: 0.1,
            layout_iterations: 50,
        }
    }
}

/// Produce the word cloud and graph drawing for one dataset.
pub fn render_dataset(
    name: &str,
    hashtags: &[(String, usize)],
    graph: &InteractionGraph,
    analytics: &GraphAnalytics,
    config: &RenderConfig,
    seed: Option<u64>,
) -> Renderings {
    let start = std::time::Instant::now();

    let wordcloud_svg = render_wordcloud(
        hashtags,
        &WordCloudOptions {
            width: config.wordcloud_width,
            height: config.wordcloud_height,
            max_words: config.wordcloud_max_words,
            seed,
        },
    );

    let positions = spring_layout(graph, config.layout_k, config.layout_iterations, seed);
    let title = format!("Interaction network of {}", name);
    let graph_svg = render_graph(
        graph,
        &positions,
        &analytics.partition,
        config.graph_size,
        &title,
    );

    tracing::debug!(
        "Rendered {} in {}ms (word cloud: {}, graph: {})",
        name,
        start.elapsed().as_millis(),
        wordcloud_svg.is_some(),
        graph_svg.is_some()
    );

    Renderings {
        wordcloud_svg,
        graph_svg,
    }
}
