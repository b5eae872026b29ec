//! Relationship network analytics engine.
//!
//! Computes shortest paths, communities and centrality over a case's
//! relationship graph (people connected by calls, chats, emails, shared
//! contacts and group memberships).
//!
//! ## Architecture
//!
//! ```text
//! SnapshotSource (file / HTTP) ──► NetworkSnapshot ──► build_graph ──► RelationshipGraph
//!                                                                          │
//!                                                          filter_graph(FilterParameters)
//!                                                                          │
//!                                                                    FilteredGraph
//!                                                   ┌──────────────────────┼───────────────────┐
//!                                             shortest_path      label_propagation    compute_centrality
//!
//!                     AnalysisSession (caller-owned, memoizes FilteredGraph per parameters)
//! ```
//!
//! ## Modules
//!
//! - [`models`]: Data structures (PersonNode, Interaction, FilterParameters, results)
//! - [`error`]: `InvalidGraphError` and `AnalysisError`
//! - [`graph`]: `RelationshipGraph` construction and lookups
//! - [`filter`]: `FilteredGraph` derivation
//! - [`algorithms`]: BFS path, label propagation, degree / betweenness, components
//! - [`session`]: `AnalysisSession` with memoized filtered graphs
//! - [`source`]: `SnapshotSource` trait with file and HTTP implementations
//! - [`mock`]: `MockSnapshotSource` for testing (cfg(test) only)

pub mod algorithms;
pub mod error;
pub mod filter;
pub mod graph;
pub mod models;
pub mod session;
pub mod source;

#[cfg(test)]
pub mod mock;

// Re-export primary types for convenience
pub use algorithms::{
    betweenness_centrality, compute_all, compute_centrality, connected_components,
    degree_centrality, label_propagation, person_details, shortest_path, summarize,
    LABEL_PROPAGATION_MAX_PASSES,
};
pub use error::{AnalysisError, InvalidGraphError};
pub use filter::{filter_graph, FilteredGraph};
pub use graph::{build_graph, RelationshipGraph};
pub use models::{
    AnalyticsConfig, CentralityScores, Community, CommunityAssignment, ComponentInfo, Connection,
    FilterParameters, Interaction, InteractionRecord, InteractionType, NetworkReport,
    NetworkSnapshot, NetworkSummary, NodeKind, PathOutcome, PersonDetails, PersonNode,
};
pub use session::AnalysisSession;
pub use source::{load_session, FileSnapshotSource, HttpSnapshotSource, SnapshotSource};
