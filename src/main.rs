//! Tweetnet - command line entry point
//!
//! Analyzes line-delimited JSON post archives and prints a report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tweetnet::graph::GraphMode;
use tweetnet::text::clean_text;
use tweetnet::{Config, DatasetConfig, Report};

#[derive(Parser)]
#[command(name = "tweetnet")]
#[command(about = "Interaction-graph analytics for post archives")]
struct Cli {
    /// YAML config file (default: tweetnet.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over every configured dataset
    Analyze {
        /// Dataset as NAME=PATH; repeat for several (replaces configured datasets)
        #[arg(short, long = "dataset", value_name = "NAME=PATH")]
        datasets: Vec<String>,

        /// Rows in frequency tables
        #[arg(long)]
        top_k: Option<usize>,

        /// Ignore interaction direction
        #[arg(long)]
        undirected: bool,

        /// Only record mentions, no retweet/reply interactions
        #[arg(long)]
        untyped: bool,

        /// Seed for community detection and layouts
        #[arg(long, conflicts_with = "unseeded")]
        seed: Option<u64>,

        /// Draw from OS entropy instead of a fixed seed
        #[arg(long)]
        unseeded: bool,

        /// Produce word cloud and graph SVGs
        #[arg(long)]
        render: bool,

        /// Directory to write SVGs into (implies --render)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the cleaned form of a text
    Clean {
        text: String,
    },
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, so stdout stays machine-readable)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tweetnet=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            datasets,
            top_k,
            undirected,
            untyped,
            seed,
            unseeded,
            render,
            output_dir,
        } => {
            let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

            if !datasets.is_empty() {
                config.datasets = datasets
                    .iter()
                    .map(|d| DatasetConfig::parse(d))
                    .collect::<Result<_>>()?;
            }
            if let Some(top_k) = top_k {
                config.analysis.top_k = top_k;
            }
            if undirected {
                config.analysis.graph_mode = GraphMode::Undirected;
            }
            if untyped {
                config.analysis.typed_edges = false;
            }
            if seed.is_some() || unseeded {
                config.analysis.seed = seed;
            }
            if output_dir.is_some() {
                config.render.output_dir = output_dir;
            }
            if render || config.render.output_dir.is_some() {
                config.render.enabled = true;
            }

            run_analyze(&config, cli.json)
        }
        Commands::Clean { text } => {
            match clean_text(&text) {
                Some(cleaned) => println!("{}", cleaned),
                None => println!("(blank)"),
            }
            Ok(())
        }
    }
}

fn run_analyze(config: &Config, json: bool) -> Result<()> {
    let report = tweetnet::run(config)?;

    if let Some(dir) = &config.render.output_dir {
        write_renderings(&report, dir)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

/// File-name friendly form of a dataset name.
fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn write_renderings(report: &Report, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    for dataset in &report.datasets {
        let Some(renderings) = dataset
            .outcome
            .analysis()
            .and_then(|a| a.renderings.as_ref())
        else {
            continue;
        };

        let files = [
            ("wordcloud", &renderings.wordcloud_svg),
            ("graph", &renderings.graph_svg),
        ];
        for (kind, svg) in files {
            let Some(svg) = svg else { continue };
            let path = dir.join(format!("{}_{}.svg", slug(&dataset.name), kind));
            std::fs::write(&path, svg)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
    }
    Ok(())
}
