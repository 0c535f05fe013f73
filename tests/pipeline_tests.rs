//! End-to-end tests: fixture files on disk through `tweetnet::run`.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;
use tweetnet::graph::{Diameter, GraphMode};
use tweetnet::{run, Config, DatasetConfig, DatasetOutcome};

fn write_fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}

fn config_for(datasets: Vec<DatasetConfig>) -> Config {
    Config {
        datasets,
        ..Config::default()
    }
}

const ARCHIVE: &str = r#"{"rawContent": "Hola @Ana! Mira https://t.co/abc #Trafico", "user": {"username": "Luis"}}
{"rawContent": "@luis gracias #trafico #lluvia", "user": {"username": "ana"}}
this line is not json
{"rawContent": "RT @ana: Hola @luis", "user": {"username": "pedro"}}
{"rawContent": "Hola @ana mira  #TRAFICO", "user": {"username": "luis"}}

{"text": "solo texto", "user": "maria"}
{"rawContent": "@pedro ok", "user": {"username": "carla"}}
[1, 2, 3]
"#;

#[test]
fn test_full_pipeline_on_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "archive.jsonl", ARCHIVE.as_bytes());

    let report = run(&config_for(vec![DatasetConfig::new("archive", &path)])).unwrap();
    assert_eq!(report.datasets.len(), 1);

    let dataset = report.dataset("archive").unwrap();
    let analysis = dataset.outcome.analysis().expect("dataset should be analyzed");

    assert_eq!(analysis.load.lines_read, 8);
    assert_eq!(analysis.load.lines_skipped, 2);
    // line 5 cleans to the same text as line 1
    assert_eq!(analysis.duplicates_removed, 1);
    assert_eq!(analysis.post_count, 5);
    assert_eq!(analysis.unique_authors, 5);
    assert_eq!(analysis.retweet_count, 1);
    assert_eq!(analysis.reply_count, 2);

    assert_eq!(analysis.top_mentions[0], ("@ana".to_string(), 2));
    assert_eq!(analysis.top_hashtags[0], ("#trafico".to_string(), 2));

    // luis→ana, ana→luis, pedro→ana, pedro→luis, carla→pedro
    let metrics = &analysis.graph.metrics;
    assert_eq!(metrics.mode, GraphMode::Directed);
    assert_eq!(metrics.node_count, 4);
    assert_eq!(metrics.edge_count, 5);
    assert_eq!(metrics.diameter, Diameter::Value(2));
    assert_eq!(metrics.component_count, 1);
    assert!((metrics.density - 5.0 / 12.0).abs() < 1e-12);

    assert_eq!(analysis.graph.partition.len(), 4);
    assert!(analysis.renderings.is_none());
}

#[test]
fn test_undirected_mode_merges_mutual_interactions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "archive.jsonl", ARCHIVE.as_bytes());

    let mut config = config_for(vec![DatasetConfig::new("archive", &path)]);
    config.analysis.graph_mode = GraphMode::Undirected;
    let report = run(&config).unwrap();

    let analysis = report.datasets[0].outcome.analysis().unwrap();
    assert_eq!(analysis.graph.metrics.edge_count, 4);
    assert!((analysis.graph.metrics.density - 8.0 / 12.0).abs() < 1e-12);
}

#[test]
fn test_empty_and_missing_text_datasets_do_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write_fixture(&dir, "empty.jsonl", b"\n\nnot json\n");
    let no_text = write_fixture(
        &dir,
        "no_text.jsonl",
        b"{\"id\": 1, \"user\": \"a\"}\n{\"id\": 2, \"user\": \"b\"}\n",
    );
    let good = write_fixture(&dir, "good.jsonl", ARCHIVE.as_bytes());

    let report = run(&config_for(vec![
        DatasetConfig::new("empty", &empty),
        DatasetConfig::new("no_text", &no_text),
        DatasetConfig::new("good", &good),
    ]))
    .unwrap();

    assert!(matches!(
        report.datasets[0].outcome,
        DatasetOutcome::Empty { ref load } if load.lines_skipped == 1
    ));
    assert!(matches!(
        report.datasets[1].outcome,
        DatasetOutcome::MissingTextField { .. }
    ));
    assert!(report.datasets[2].outcome.analysis().is_some());

    let text = report.to_string();
    assert!(text.contains("=== empty"));
    assert!(text.contains("No suitable text field"));
    assert!(text.contains("Top hashtags"));
}

#[test]
fn test_utf16_archive_with_bom() {
    let dir = tempfile::tempdir().unwrap();
    let line = "{\"rawContent\": \"¡Atención @Muni! #tráfico\", \"user\": {\"username\": \"vecino\"}}\n";
    let mut bytes = vec![0xFF, 0xFE];
    for unit in line.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let path = write_fixture(&dir, "utf16.jsonl", &bytes);

    let report = run(&config_for(vec![DatasetConfig::new("utf16", &path)])).unwrap();
    let analysis = report.datasets[0].outcome.analysis().unwrap();

    assert_eq!(analysis.load.encoding, "UTF-16LE");
    assert_eq!(analysis.top_hashtags, vec![("#tráfico".to_string(), 1)]);
    assert_eq!(analysis.top_mentions, vec![("@muni".to_string(), 1)]);
    assert_eq!(analysis.graph.metrics.edge_count, 1);
}

#[test]
fn test_rendering_produces_svgs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "archive.jsonl", ARCHIVE.as_bytes());

    let mut config = config_for(vec![DatasetConfig::new("archive", &path)]);
    config.render.enabled = true;
    config.render.layout_iterations = 10;
    let report = run(&config).unwrap();

    let renderings = report.datasets[0]
        .outcome
        .analysis()
        .and_then(|a| a.renderings.clone())
        .unwrap();
    let cloud = renderings.wordcloud_svg.unwrap();
    assert!(cloud.contains("#trafico"));
    let graph = renderings.graph_svg.unwrap();
    assert_eq!(graph.matches("<circle").count(), 4);
}

#[test]
fn test_same_seed_gives_same_communities() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "archive.jsonl", ARCHIVE.as_bytes());
    let config = config_for(vec![DatasetConfig::new("archive", &path)]);

    let first = run(&config).unwrap();
    let second = run(&config).unwrap();
    assert_eq!(
        first.datasets[0].outcome.analysis().unwrap().graph.partition,
        second.datasets[0].outcome.analysis().unwrap().graph.partition
    );
}

#[test]
fn test_report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "archive.jsonl", ARCHIVE.as_bytes());
    let report = run(&config_for(vec![DatasetConfig::new("archive", &path)])).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["datasets"][0]["name"], "archive");
    assert_eq!(json["datasets"][0]["outcome"]["status"], "analyzed");
    assert_eq!(
        json["datasets"][0]["outcome"]["graph"]["metrics"]["diameter"]["status"],
        "value"
    );
}
