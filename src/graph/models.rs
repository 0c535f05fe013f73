//! Interaction graph data models.
//!
//! ## Graph structure (builder → algorithms)
//! - [`InteractionKind`] / [`InteractionEdge`] — typed, weighted who-interacts-with-whom edges
//! - [`UserNode`] — one user handle
//! - [`GraphMode`] — directed or undirected edge policy
//! - [`InteractionGraph`] — petgraph wrapper with handle ↔ NodeIndex mapping
//!
//! ## Output types (analytics)
//! - [`Diameter`], [`GraphMetrics`] — global structure
//! - [`CommunityInfo`], [`ComponentInfo`] — partitions
//! - [`CentralityEntry`] — one row of a centrality ranking
//! - [`GraphAnalytics`] — aggregated result of a full analytics run
//!
//! ## Configuration
//! - [`AnalyticsConfig`] — tuning parameters for the analytics algorithms

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

// ============================================================================
// Input types — Graph structure (builder → algorithms)
// ============================================================================

/// Kind of observed interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Mention,
    Retweet,
    Reply,
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mention => write!(f, "MENTION"),
            Self::Retweet => write!(f, "RETWEET"),
            Self::Reply => write!(f, "REPLY"),
        }
    }
}

/// A user handle node. Handles are stored without the leading `@`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNode {
    pub handle: String,
}

/// Interactions observed between one pair of users.
///
/// Repeated interactions accumulate on the same edge instead of creating
/// parallel edges; `weight` is the total count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionEdge {
    pub mentions: u32,
    pub retweets: u32,
    pub replies: u32,
    /// Total interactions, used as the edge weight by community detection
    pub weight: f64,
}

impl InteractionEdge {
    pub fn record(&mut self, kind: InteractionKind) {
        match kind {
            InteractionKind::Mention => self.mentions += 1,
            InteractionKind::Retweet => self.retweets += 1,
            InteractionKind::Reply => self.replies += 1,
        }
        self.weight += 1.0;
    }

    pub fn count(&self, kind: InteractionKind) -> u32 {
        match kind {
            InteractionKind::Mention => self.mentions,
            InteractionKind::Retweet => self.retweets,
            InteractionKind::Reply => self.replies,
        }
    }

    pub fn total(&self) -> u32 {
        self.mentions + self.retweets + self.replies
    }
}

/// Edge direction policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphMode {
    /// author → target, one edge per ordered pair
    #[default]
    Directed,
    /// one edge per unordered pair
    Undirected,
}

impl std::fmt::Display for GraphMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directed => write!(f, "directed"),
            Self::Undirected => write!(f, "undirected"),
        }
    }
}

impl std::str::FromStr for GraphMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "directed" | "digraph" => Ok(Self::Directed),
            "undirected" | "graph" => Ok(Self::Undirected),
            other => Err(format!(
                "unknown graph mode '{}' (expected 'directed' or 'undirected')",
                other
            )),
        }
    }
}

// ============================================================================
// InteractionGraph — petgraph wrapper with handle mapping
// ============================================================================

/// Wrapper around `petgraph::DiGraph` with handle ↔ NodeIndex mapping.
///
/// Nodes only come into existence as edge endpoints. In
/// [`GraphMode::Undirected`] each unordered pair is stored once, in the
/// direction it was first observed; algorithms read it through
/// [`InteractionGraph::undirected_neighbors`].
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    /// The underlying graph
    pub graph: DiGraph<UserNode, InteractionEdge>,
    /// Mapping from handle to petgraph NodeIndex
    pub id_to_index: HashMap<String, NodeIndex>,
    /// Edge lookup keyed by (source, target), normalized in undirected mode
    edge_index: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    mode: GraphMode,
}

impl InteractionGraph {
    pub fn new(mode: GraphMode) -> Self {
        Self {
            graph: DiGraph::new(),
            id_to_index: HashMap::new(),
            edge_index: HashMap::new(),
            mode,
        }
    }

    pub fn with_capacity(mode: GraphMode, nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            id_to_index: HashMap::with_capacity(nodes),
            edge_index: HashMap::with_capacity(edges),
            mode,
        }
    }

    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    pub fn is_directed(&self) -> bool {
        self.mode == GraphMode::Directed
    }

    /// Return the index for `handle`, inserting the node if needed.
    fn ensure_node(&mut self, handle: &str) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(handle) {
            return idx;
        }
        let idx = self.graph.add_node(UserNode {
            handle: handle.to_string(),
        });
        self.id_to_index.insert(handle.to_string(), idx);
        idx
    }

    fn edge_key(&self, a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
        match self.mode {
            GraphMode::Directed => (a, b),
            GraphMode::Undirected => (a.min(b), a.max(b)),
        }
    }

    /// Record one interaction `from → to`, creating nodes and the edge on
    /// first sight and accumulating onto the existing edge afterwards.
    pub fn add_interaction(&mut self, from: &str, to: &str, kind: InteractionKind) -> EdgeIndex {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        let key = self.edge_key(a, b);

        let edge = match self.edge_index.get(&key) {
            Some(&edge) => edge,
            None => {
                let edge = self.graph.add_edge(a, b, InteractionEdge::default());
                self.edge_index.insert(key, edge);
                edge
            }
        };
        self.graph[edge].record(kind);
        edge
    }

    /// Interactions recorded between two handles (either order when undirected).
    pub fn edge_between(&self, from: &str, to: &str) -> Option<&InteractionEdge> {
        let a = self.get_index(from)?;
        let b = self.get_index(to)?;
        let edge = self.edge_index.get(&self.edge_key(a, b))?;
        self.graph.edge_weight(*edge)
    }

    pub fn get_node(&self, handle: &str) -> Option<&UserNode> {
        let idx = self.id_to_index.get(handle)?;
        self.graph.node_weight(*idx)
    }

    pub fn get_index(&self, handle: &str) -> Option<NodeIndex> {
        self.id_to_index.get(handle).copied()
    }

    pub fn handle(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].handle
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of incident edge endpoints; a self-loop counts twice.
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
            + self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Distinct neighbors in either direction, excluding `idx` itself.
    pub fn undirected_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut seen = HashSet::new();
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .chain(self.graph.neighbors_directed(idx, Direction::Incoming))
            .filter(|&n| n != idx && seen.insert(n))
            .collect()
    }

    /// Whether `a` and `b` are adjacent ignoring direction.
    pub fn connected(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.graph.contains_edge(a, b) || self.graph.contains_edge(b, a)
    }
}

// ============================================================================
// Output types — Analytics results
// ============================================================================

/// Longest shortest path of the undirected projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Diameter {
    Value(usize),
    NotConnected,
    EmptyGraph,
}

impl std::fmt::Display for Diameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(d) => write!(f, "{}", d),
            Self::NotConnected => write!(f, "not connected"),
            Self::EmptyGraph => write!(f, "empty graph"),
        }
    }
}

/// Global structure metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub mode: GraphMode,
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges present over edges possible
    pub density: f64,
    pub diameter: Diameter,
    /// Mean local clustering coefficient of the undirected projection
    pub average_clustering: f64,
    /// Weakly connected component count
    pub component_count: usize,
}

/// A community found by Louvain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityInfo {
    /// Community identifier
    pub id: u32,
    /// Number of users in this community
    pub size: usize,
    /// Handles, in graph insertion order
    pub members: Vec<String>,
    /// Highest-degree member
    pub label: String,
}

/// A weakly connected component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub id: u32,
    pub size: usize,
    pub members: Vec<String>,
    /// Whether this is the largest (main) component
    pub is_main: bool,
}

/// One row of a centrality ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityEntry {
    pub handle: String,
    pub score: f64,
}

/// Complete result of a graph analytics computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphAnalytics {
    pub metrics: GraphMetrics,
    /// Community id per handle
    pub partition: BTreeMap<String, u32>,
    /// Community summaries, largest first
    pub communities: Vec<CommunityInfo>,
    /// Modularity of `partition`
    pub modularity: f64,
    /// Component summaries, largest first
    pub components: Vec<ComponentInfo>,
    /// Degree centrality, descending
    pub degree_centrality: Vec<CentralityEntry>,
    /// Betweenness centrality, descending
    pub betweenness: Vec<CentralityEntry>,
    /// Computation time in milliseconds
    pub computation_ms: u64,
}

// ============================================================================
// Configuration
// ============================================================================

/// Tuning parameters for graph analytics algorithms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Louvain resolution parameter (default: 1.0, higher = smaller communities)
    pub louvain_resolution: f64,
    /// Maximum Louvain aggregation levels (default: 10)
    pub louvain_max_levels: usize,
    /// Maximum local-moving passes per level (default: 100)
    pub louvain_max_passes: usize,
    /// Seed for Louvain node ordering; `None` draws from OS entropy (default: 42)
    pub seed: Option<u64>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            louvain_resolution: 1.0,
            louvain_max_levels: 10,
            louvain_max_passes: 100,
            seed: Some(42),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_config_defaults() {
        let config = AnalyticsConfig::default();
        assert!((config.louvain_resolution - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.louvain_max_levels, 10);
        assert_eq!(config.louvain_max_passes, 100);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_analytics_config_partial_yaml() {
        let config: AnalyticsConfig = serde_yaml::from_str("seed: null\nlouvain_resolution: 0.5").unwrap();
        assert_eq!(config.seed, None);
        assert!((config.louvain_resolution - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.louvain_max_levels, 10);
    }

    #[test]
    fn test_interaction_kind_display() {
        assert_eq!(InteractionKind::Mention.to_string(), "MENTION");
        assert_eq!(InteractionKind::Retweet.to_string(), "RETWEET");
        assert_eq!(InteractionKind::Reply.to_string(), "REPLY");
    }

    #[test]
    fn test_graph_mode_parse() {
        assert_eq!("directed".parse::<GraphMode>(), Ok(GraphMode::Directed));
        assert_eq!(" Undirected ".parse::<GraphMode>(), Ok(GraphMode::Undirected));
        assert!("sideways".parse::<GraphMode>().is_err());
        assert_eq!(GraphMode::default(), GraphMode::Directed);
    }

    #[test]
    fn test_edge_accumulates_by_kind() {
        let mut edge = InteractionEdge::default();
        edge.record(InteractionKind::Mention);
        edge.record(InteractionKind::Mention);
        edge.record(InteractionKind::Reply);
        assert_eq!(edge.count(InteractionKind::Mention), 2);
        assert_eq!(edge.count(InteractionKind::Reply), 1);
        assert_eq!(edge.count(InteractionKind::Retweet), 0);
        assert_eq!(edge.total(), 3);
        assert!((edge.weight - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_directed_graph_keeps_both_directions() {
        let mut g = InteractionGraph::new(GraphMode::Directed);
        g.add_interaction("u1", "u2", InteractionKind::Mention);
        g.add_interaction("u2", "u1", InteractionKind::Mention);
        g.add_interaction("u1", "u2", InteractionKind::Mention);

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_between("u1", "u2").unwrap().mentions, 2);
        assert_eq!(g.edge_between("u2", "u1").unwrap().mentions, 1);
    }

    #[test]
    fn test_undirected_graph_merges_pair() {
        let mut g = InteractionGraph::new(GraphMode::Undirected);
        g.add_interaction("u1", "u2", InteractionKind::Mention);
        g.add_interaction("u2", "u1", InteractionKind::Reply);

        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        let edge = g.edge_between("u2", "u1").unwrap();
        assert_eq!(edge.total(), 2);
        assert_eq!(g.edge_between("u1", "u2"), Some(edge));
    }

    #[test]
    fn test_degree_and_neighbors() {
        let mut g = InteractionGraph::new(GraphMode::Directed);
        g.add_interaction("a", "b", InteractionKind::Mention);
        g.add_interaction("c", "a", InteractionKind::Mention);
        g.add_interaction("a", "a", InteractionKind::Mention);

        let a = g.get_index("a").unwrap();
        assert_eq!(g.degree(a), 4);
        let mut neighbors: Vec<&str> = g.undirected_neighbors(a).into_iter().map(|n| g.handle(n)).collect();
        neighbors.sort();
        assert_eq!(neighbors, vec!["b", "c"]);
        assert!(g.connected(g.get_index("c").unwrap(), a));
        assert!(!g.connected(g.get_index("b").unwrap(), g.get_index("c").unwrap()));
    }

    #[test]
    fn test_lookup_missing() {
        let g = InteractionGraph::new(GraphMode::Directed);
        assert!(g.get_node("nobody").is_none());
        assert!(g.get_index("nobody").is_none());
        assert!(g.edge_between("a", "b").is_none());
    }

    #[test]
    fn test_diameter_display() {
        assert_eq!(Diameter::Value(3).to_string(), "3");
        assert_eq!(Diameter::NotConnected.to_string(), "not connected");
        assert_eq!(Diameter::EmptyGraph.to_string(), "empty graph");
    }

    #[test]
    fn test_graph_analytics_serde_roundtrip() {
        let analytics = GraphAnalytics {
            metrics: GraphMetrics {
                mode: GraphMode::Undirected,
                node_count: 3,
                edge_count: 2,
                density: 2.0 / 3.0,
                diameter: Diameter::NotConnected,
                average_clustering: 0.0,
                component_count: 1,
            },
            partition: BTreeMap::new(),
            communities: vec![],
            modularity: 0.25,
            components: vec![],
            degree_centrality: vec![],
            betweenness: vec![],
            computation_ms: 1,
        };
        let json = serde_json::to_string(&analytics).unwrap();
        let back: GraphAnalytics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics.diameter, Diameter::NotConnected);
        assert_eq!(back.metrics.mode, GraphMode::Undirected);
        assert!((back.modularity - 0.25).abs() < f64::EPSILON);
    }
}
