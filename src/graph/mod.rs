//! Interaction graph construction and analytics.
//!
//! Builds a who-interacts-with-whom graph on petgraph and computes density,
//! diameter, clustering, weakly connected components, Louvain communities,
//! and degree/betweenness centrality on it.
//!
//! ## Architecture
//!
//! ```text
//! RecordTable ──► builder ──► InteractionGraph (petgraph::DiGraph)
//!                                      │
//!                                 algorithms
//!                                      │
//!                             GraphAnalytics result
//! ```
//!
//! ## Modules
//!
//! - [`models`] — Data structures (InteractionGraph, GraphMetrics, CommunityInfo, AnalyticsConfig)
//! - [`builder`] — Record table → interaction graph
//! - [`algorithms`] — Algorithm implementations (Density, Diameter, Clustering, WCC, Louvain, Centrality)

pub mod algorithms;
pub mod builder;
pub mod models;

// Re-export primary types for convenience
pub use algorithms::compute_all;
pub use builder::{build_interaction_graph, BuildOptions};
pub use models::{
    AnalyticsConfig, CentralityEntry, CommunityInfo, ComponentInfo, Diameter, GraphAnalytics,
    GraphMetrics, GraphMode, InteractionEdge, InteractionGraph, InteractionKind, UserNode,
};
