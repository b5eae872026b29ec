//! Engine error types.
//!
//! Malformed snapshots surface as [`InvalidGraphError`] and are fatal to that
//! snapshot. Path lookups that fail are ordinary results
//! ([`PathOutcome`](super::models::PathOutcome)), not errors.

/// The snapshot violates a graph invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidGraphError {
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("edge {source_id} -- {target_id} references unknown node {missing}")]
    DanglingEdge {
        source_id: String,
        target_id: String,
        missing: String,
    },

    #[error("edge {source_id} -- {target_id} has non-positive weight {weight}")]
    NonPositiveWeight {
        source_id: String,
        target_id: String,
        weight: u64,
    },

    #[error("edge {source_id} -- {target_id} has no interaction types")]
    EmptyInteraction { source_id: String, target_id: String },

    #[error("duplicate edge between {source_id} and {target_id}")]
    DuplicateEdge { source_id: String, target_id: String },

    #[error("self-loop on node {id}")]
    SelfLoop { id: String },
}

/// An analysis was refused for the given graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("filtered graph has {nodes} nodes, above the centrality limit of {limit}")]
    GraphTooLarge { nodes: usize, limit: usize },
}
