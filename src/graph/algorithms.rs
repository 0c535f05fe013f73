//! Graph analytics algorithms.
//!
//! Implements the structural metrics reported for an interaction graph:
//! - **Density** — edges present over edges possible, respecting the graph mode
//! - **Diameter** — BFS eccentricities on the undirected projection
//! - **Clustering coefficient** — local clustering per node, averaged
//! - **Weakly connected components** — BFS on the undirected view
//! - **Community detection (Louvain)** — multi-level, seeded node ordering
//! - **Degree centrality** — incident edges / (n − 1)
//! - **Betweenness centrality** — via `rustworkx_core::centrality::betweenness_centrality`
//!
//! All algorithms operate on `InteractionGraph` and return results keyed or
//! ordered by user handle.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, VecDeque};

use super::models::{
    AnalyticsConfig, CentralityEntry, CommunityInfo, ComponentInfo, Diameter, GraphAnalytics,
    GraphMetrics, GraphMode, InteractionGraph,
};

/// Minimum modularity gain for a Louvain move to count.
const MIN_GAIN: f64 = 1e-12;

// ============================================================================
// Density & Diameter
// ============================================================================

/// Graph density. Zero for graphs with fewer than two nodes.
///
/// Directed: `m / (n(n-1))`. Undirected: `2m / (n(n-1))`.
pub fn density(graph: &InteractionGraph) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    let m = graph.edge_count() as f64;
    let possible = (n * (n - 1)) as f64;
    match graph.mode() {
        GraphMode::Directed => m / possible,
        GraphMode::Undirected => 2.0 * m / possible,
    }
}

/// Diameter of the undirected projection.
///
/// Returns [`Diameter::NotConnected`] instead of failing when some pair of
/// users cannot reach each other.
pub fn diameter(graph: &InteractionGraph) -> Diameter {
    let n = graph.node_count();
    if n == 0 {
        return Diameter::EmptyGraph;
    }

    let adjacency: Vec<Vec<usize>> = graph
        .graph
        .node_indices()
        .map(|idx| {
            graph
                .undirected_neighbors(idx)
                .into_iter()
                .map(|n| n.index())
                .collect()
        })
        .collect();

    let mut longest = 0usize;
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::new();

    for start in 0..n {
        dist.iter_mut().for_each(|d| *d = None);
        dist[start] = Some(0);
        queue.clear();
        queue.push_back(start);
        let mut reached = 1usize;

        while let Some(current) = queue.pop_front() {
            let d = dist[current].unwrap_or(0);
            longest = longest.max(d);
            for &next in &adjacency[current] {
                if dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        if reached < n {
            return Diameter::NotConnected;
        }
    }

    Diameter::Value(longest)
}

// ============================================================================
// Clustering Coefficient
// ============================================================================

/// Compute the local clustering coefficient for each node.
///
/// Uses the undirected neighborhood without self-loops:
/// coefficient = triangles / possible_triangles, where
/// possible_triangles = k * (k-1) / 2 for k = number of unique neighbors.
pub fn clustering_coefficient(graph: &InteractionGraph) -> HashMap<String, f64> {
    let mut result = HashMap::with_capacity(graph.node_count());

    for idx in graph.graph.node_indices() {
        let neighbors = graph.undirected_neighbors(idx);
        let k = neighbors.len();
        if k < 2 {
            result.insert(graph.handle(idx).to_string(), 0.0);
            continue;
        }

        let mut triangles = 0usize;
        for i in 0..k {
            for j in (i + 1)..k {
                if graph.connected(neighbors[i], neighbors[j]) {
                    triangles += 1;
                }
            }
        }

        let possible = k * (k - 1) / 2;
        result.insert(
            graph.handle(idx).to_string(),
            triangles as f64 / possible as f64,
        );
    }

    result
}

/// Mean local clustering coefficient over all nodes (0 for an empty graph).
pub fn average_clustering(graph: &InteractionGraph) -> f64 {
    let cc = clustering_coefficient(graph);
    if cc.is_empty() {
        return 0.0;
    }
    cc.values().sum::<f64>() / cc.len() as f64
}

// ============================================================================
// Weakly Connected Components
// ============================================================================

/// Identify weakly connected components (treating edges as undirected).
///
/// Returns `(handle_to_component, component_infos)`, components largest first.
pub fn connected_components(graph: &InteractionGraph) -> (HashMap<String, u32>, Vec<ComponentInfo>) {
    let n = graph.node_count();
    if n == 0 {
        return (HashMap::new(), vec![]);
    }

    let mut component_of: Vec<Option<u32>> = vec![None; n];
    let mut component_id = 0u32;

    for start in graph.graph.node_indices() {
        if component_of[start.index()].is_some() {
            continue;
        }
        let mut queue = VecDeque::new();
        queue.push_back(start);
        component_of[start.index()] = Some(component_id);

        while let Some(current) = queue.pop_front() {
            for neighbor in graph.undirected_neighbors(current) {
                if component_of[neighbor.index()].is_none() {
                    component_of[neighbor.index()] = Some(component_id);
                    queue.push_back(neighbor);
                }
            }
        }
        component_id += 1;
    }

    let mut node_map = HashMap::with_capacity(n);
    let mut comp_members: BTreeMap<u32, Vec<String>> = BTreeMap::new();

    for idx in graph.graph.node_indices() {
        let handle = graph.handle(idx).to_string();
        let comp = component_of[idx.index()].unwrap_or(0);
        node_map.insert(handle.clone(), comp);
        comp_members.entry(comp).or_default().push(handle);
    }

    let max_size = comp_members.values().map(|v| v.len()).max().unwrap_or(0);

    let mut components: Vec<ComponentInfo> = comp_members
        .into_iter()
        .map(|(id, members)| ComponentInfo {
            id,
            size: members.len(),
            is_main: members.len() == max_size,
            members,
        })
        .collect();
    components.sort_by_key(|c| std::cmp::Reverse(c.size));

    (node_map, components)
}

// ============================================================================
// Community Detection — Louvain (multi-level)
// ============================================================================

/// Weighted undirected graph used by one Louvain level.
#[derive(Debug, Clone)]
struct LevelGraph {
    /// Each undirected edge once, self-loops included
    edges: Vec<(usize, usize, f64)>,
    /// Neighbor lists without self-loops
    adjacency: Vec<Vec<(usize, f64)>>,
    /// Weighted degree; a self-loop counts twice
    strengths: Vec<f64>,
    /// Sum of edge weights (m)
    total_weight: f64,
}

impl LevelGraph {
    fn from_edges(n: usize, edges: Vec<(usize, usize, f64)>) -> Self {
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        let mut strengths = vec![0.0; n];
        let mut total_weight = 0.0;

        for &(s, t, w) in &edges {
            strengths[s] += w;
            strengths[t] += w;
            total_weight += w;
            if s != t {
                adjacency[s].push((t, w));
                adjacency[t].push((s, w));
            }
        }

        Self {
            edges,
            adjacency,
            strengths,
            total_weight,
        }
    }

    /// Undirected projection of the interaction graph; opposite directed
    /// edges merge and their weights add up.
    fn from_interactions(graph: &InteractionGraph) -> Self {
        let mut merged: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for edge in graph.graph.edge_references() {
            let s = edge.source().index();
            let t = edge.target().index();
            *merged.entry((s.min(t), s.max(t))).or_default() += edge.weight().weight;
        }
        let edges = merged.into_iter().map(|((s, t), w)| (s, t, w)).collect();
        Self::from_edges(graph.node_count(), edges)
    }

    fn len(&self) -> usize {
        self.strengths.len()
    }

    /// Collapse each community into a single node.
    fn aggregate(&self, community: &[usize], count: usize) -> Self {
        let mut merged: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for &(s, t, w) in &self.edges {
            let (cs, ct) = (community[s], community[t]);
            *merged.entry((cs.min(ct), cs.max(ct))).or_default() += w;
        }
        let edges = merged.into_iter().map(|((s, t), w)| (s, t, w)).collect();
        Self::from_edges(count, edges)
    }
}

/// One local-moving phase. Returns the community of each node and whether
/// any node changed community.
fn local_moving(
    level: &LevelGraph,
    resolution: f64,
    max_passes: usize,
    rng: &mut StdRng,
) -> (Vec<usize>, bool) {
    let n = level.len();
    let mut community: Vec<usize> = (0..n).collect();
    let m = level.total_weight;
    if m == 0.0 {
        return (community, false);
    }

    let mut totals = level.strengths.clone();
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut improved = false;
    for _ in 0..max_passes {
        let mut moved = false;

        for &node in &order {
            let current = community[node];
            let ki = level.strengths[node];

            let mut links: BTreeMap<usize, f64> = BTreeMap::new();
            for &(neighbor, w) in &level.adjacency[node] {
                *links.entry(community[neighbor]).or_default() += w;
            }

            // Take the node out, then find the best community to put it back in
            totals[current] -= ki;
            let gain = |comm: usize, w_to: f64, totals: &[f64]| {
                w_to / m - resolution * totals[comm] * ki / (2.0 * m * m)
            };

            let mut best = current;
            let mut best_gain = gain(current, links.get(&current).copied().unwrap_or(0.0), &totals);
            for (&comm, &w_to) in &links {
                if comm == current {
                    continue;
                }
                let g = gain(comm, w_to, &totals);
                if g > best_gain + MIN_GAIN {
                    best = comm;
                    best_gain = g;
                }
            }

            totals[best] += ki;
            if best != current {
                community[node] = best;
                moved = true;
                improved = true;
            }
        }

        if !moved {
            break;
        }
    }

    (community, improved)
}

/// Renumber labels to be contiguous (0, 1, 2, ...) in order of first appearance.
fn renumber(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let renumbered = labels
        .iter()
        .map(|label| {
            let next = remap.len();
            *remap.entry(*label).or_insert(next)
        })
        .collect();
    (renumbered, remap.len())
}

/// Newman modularity with resolution: `Σ_c [L_c/m − γ(d_c/2m)²]`.
fn compute_modularity(level: &LevelGraph, community: &[usize], resolution: f64) -> f64 {
    let m = level.total_weight;
    if m == 0.0 {
        return 0.0;
    }

    let mut internal: HashMap<usize, f64> = HashMap::new();
    let mut degree: HashMap<usize, f64> = HashMap::new();

    for &(s, t, w) in &level.edges {
        if community[s] == community[t] {
            *internal.entry(community[s]).or_default() += w;
        }
    }
    for (node, &k) in level.strengths.iter().enumerate() {
        *degree.entry(community[node]).or_default() += k;
    }

    degree
        .iter()
        .map(|(comm, &d)| {
            let l = internal.get(comm).copied().unwrap_or(0.0);
            l / m - resolution * (d / (2.0 * m)).powi(2)
        })
        .sum()
}

fn louvain_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Detect communities using the Louvain method.
///
/// Returns `(handle_to_community, communities, modularity)`.
///
/// Works on the weighted undirected projection. Each level shuffles the node
/// visiting order with the configured seed, greedily moves nodes while
/// modularity improves, then collapses communities into super-nodes. Stops
/// when a level moves nothing or `louvain_max_levels` is reached.
pub fn louvain_communities(
    graph: &InteractionGraph,
    config: &AnalyticsConfig,
) -> (HashMap<String, u32>, Vec<CommunityInfo>, f64) {
    let n = graph.node_count();
    if n == 0 {
        return (HashMap::new(), vec![], 0.0);
    }

    let mut rng = louvain_rng(config.seed);
    let base = LevelGraph::from_interactions(graph);

    // Original node → node of the current level
    let mut assignment: Vec<usize> = (0..n).collect();
    let mut level = base.clone();

    for depth in 0..config.louvain_max_levels {
        let (community, improved) = local_moving(
            &level,
            config.louvain_resolution,
            config.louvain_max_passes,
            &mut rng,
        );
        if !improved {
            break;
        }
        let (community, count) = renumber(&community);
        for a in assignment.iter_mut() {
            *a = community[*a];
        }
        tracing::debug!("Louvain level {}: {} → {} nodes", depth, level.len(), count);
        level = level.aggregate(&community, count);
    }

    let (final_ids, _) = renumber(&assignment);
    let modularity = compute_modularity(&base, &final_ids, config.louvain_resolution);

    let mut node_map = HashMap::with_capacity(n);
    let mut comm_members: BTreeMap<u32, Vec<NodeIndex>> = BTreeMap::new();
    for idx in graph.graph.node_indices() {
        let comm = final_ids[idx.index()] as u32;
        node_map.insert(graph.handle(idx).to_string(), comm);
        comm_members.entry(comm).or_default().push(idx);
    }

    let mut communities: Vec<CommunityInfo> = comm_members
        .into_iter()
        .map(|(id, members)| CommunityInfo {
            id,
            size: members.len(),
            label: community_label(graph, &members),
            members: members
                .iter()
                .map(|&idx| graph.handle(idx).to_string())
                .collect(),
        })
        .collect();
    communities.sort_by_key(|c| std::cmp::Reverse(c.size));

    (node_map, communities, modularity)
}

/// Label a community by its highest-degree member (earliest on ties).
fn community_label(graph: &InteractionGraph, members: &[NodeIndex]) -> String {
    let mut best: Option<(NodeIndex, usize)> = None;
    for &idx in members {
        let degree = graph.degree(idx);
        match best {
            Some((_, d)) if degree <= d => {}
            _ => best = Some((idx, degree)),
        }
    }
    best.map(|(idx, _)| graph.handle(idx).to_string())
        .unwrap_or_else(|| "empty".to_string())
}

// ============================================================================
// Centrality
// ============================================================================

/// Sort descending by score; equal scores keep graph insertion order.
fn rank_descending(mut entries: Vec<CentralityEntry>) -> Vec<CentralityEntry> {
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    entries
}

/// Degree centrality: incident edges divided by `n − 1`, descending.
///
/// A single-node graph scores 1.0.
pub fn degree_centrality(graph: &InteractionGraph) -> Vec<CentralityEntry> {
    let n = graph.node_count();
    if n == 0 {
        return vec![];
    }
    let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 1.0 };

    let entries = graph
        .graph
        .node_indices()
        .map(|idx| CentralityEntry {
            handle: graph.handle(idx).to_string(),
            score: if n > 1 {
                graph.degree(idx) as f64 * scale
            } else {
                1.0
            },
        })
        .collect();
    rank_descending(entries)
}

/// Build an undirected copy with identical node indices.
fn undirected_projection(graph: &InteractionGraph) -> UnGraph<(), ()> {
    let mut projection = UnGraph::with_capacity(graph.node_count(), graph.edge_count());
    for _ in graph.graph.node_indices() {
        projection.add_node(());
    }
    for edge in graph.graph.edge_references() {
        projection.add_edge(edge.source(), edge.target(), ());
    }
    projection
}

/// Normalized betweenness centrality, descending.
///
/// Directed graphs use directed shortest paths; undirected graphs are
/// evaluated on an undirected copy.
pub fn betweenness_centrality(graph: &InteractionGraph) -> Vec<CentralityEntry> {
    let g = &graph.graph;
    if g.node_count() == 0 {
        return vec![];
    }

    let scores = match graph.mode() {
        GraphMode::Directed => rustworkx_core::centrality::betweenness_centrality(
            g, false, // include_endpoints
            true,  // normalized
            200,   // parallel_threshold (sequential for small graphs)
        ),
        GraphMode::Undirected => {
            let projection = undirected_projection(graph);
            rustworkx_core::centrality::betweenness_centrality(&projection, false, true, 200)
        }
    };

    let entries = g
        .node_indices()
        .map(|idx| CentralityEntry {
            handle: graph.handle(idx).to_string(),
            score: scores[idx.index()].unwrap_or(0.0),
        })
        .collect();
    rank_descending(entries)
}

// ============================================================================
// All metrics: compute_all
// ============================================================================

/// Run every algorithm and assemble a complete `GraphAnalytics` result.
pub fn compute_all(graph: &InteractionGraph, config: &AnalyticsConfig) -> GraphAnalytics {
    let start = std::time::Instant::now();

    let (_, components) = connected_components(graph);
    let (partition, communities, modularity) = louvain_communities(graph, config);

    let metrics = GraphMetrics {
        mode: graph.mode(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        density: density(graph),
        diameter: diameter(graph),
        average_clustering: average_clustering(graph),
        component_count: components.len(),
    };

    let degree = degree_centrality(graph);
    let betweenness = betweenness_centrality(graph);

    let elapsed = start.elapsed();

    GraphAnalytics {
        metrics,
        partition: partition.into_iter().collect(),
        communities,
        modularity,
        components,
        degree_centrality: degree,
        betweenness,
        computation_ms: elapsed.as_millis() as u64,
    }
}

// ============================================================================
// Tests
// ============================================================================
