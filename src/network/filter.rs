//! Filter stage.
//!
//! Derives the visible sub-graph from the full graph for one set of
//! [`FilterParameters`]. Every analytical query runs on the result.
//!
//! Retention rules:
//! - an edge survives iff `weight >= min_weight` and one of its per-type
//!   records has an enabled type
//! - a primary node always survives
//! - a secondary node survives iff `include_secondary` is set or it is an
//!   endpoint of a surviving edge
//!
//! The filtered adjacency is rebuilt from the surviving edges, so it never
//! references a node outside the surviving node set.

use std::ops::Deref;
use std::sync::Arc;

use super::graph::RelationshipGraph;
use super::models::{FilterParameters, Interaction, PersonNode};

/// The sub-graph visible under one set of filter parameters.
///
/// Derefs to [`RelationshipGraph`], so every read operation and every
/// algorithm accepts it directly.
#[derive(Debug, Clone)]
pub struct FilteredGraph {
    graph: RelationshipGraph,
    params: FilterParameters,
}

impl FilteredGraph {
    /// The parameters that produced this graph.
    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Deref for FilteredGraph {
    type Target = RelationshipGraph;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

/// Apply `params` to `graph`.
///
/// Pure and deterministic: node and edge order of the result follow the
/// order of the full graph.
pub fn filter_graph(graph: &RelationshipGraph, params: &FilterParameters) -> FilteredGraph {
    let mut is_endpoint = vec![false; graph.node_count()];

    let edges: Vec<Interaction> = graph
        .edges()
        .filter(|edge| params.admits(edge))
        .inspect(|edge| {
            for id in [&edge.source_id, &edge.target_id] {
                if let Some(idx) = graph.index_of(id) {
                    is_endpoint[idx.index()] = true;
                }
            }
        })
        .cloned()
        .collect();

    let nodes: Vec<PersonNode> = graph
        .nodes()
        .enumerate()
        .filter(|(i, node)| node.is_primary() || params.include_secondary || is_endpoint[*i])
        .map(|(_, node)| node.clone())
        .collect();

    tracing::debug!(
        "Filtered graph: {}/{} nodes, {}/{} edges (min_weight={}, types={}, include_secondary={})",
        nodes.len(),
        graph.node_count(),
        edges.len(),
        graph.edge_count(),
        params.min_weight,
        params.enabled_types.len(),
        params.include_secondary
    );

    FilteredGraph {
        graph: RelationshipGraph::from_validated(nodes, edges),
        params: params.clone(),
    }
}

// ============================================================================
// Tests
// ============================================================================
