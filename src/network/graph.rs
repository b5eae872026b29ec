//! Graph model.
//!
//! [`RelationshipGraph`] normalizes a snapshot's node and edge lists into an
//! undirected `petgraph::UnGraph` plus an explicit, ordered adjacency list.
//! The adjacency order is the order edges appear in the input, which makes
//! BFS tie-breaking and label propagation reproducible for a given snapshot.
//!
//! A graph is read-only once built. Filtering produces a new graph.

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet};

use super::error::InvalidGraphError;
use super::models::{Interaction, NetworkSnapshot, PersonNode};

// ============================================================================
// RelationshipGraph
// ============================================================================

/// Undirected relationship graph with id ↔ `NodeIndex` mapping.
///
/// Node indices follow the input node order; `adjacency[i]` lists the
/// neighbours of node `i` in the order their edges appeared in the input.
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    graph: UnGraph<PersonNode, Interaction>,
    id_to_index: HashMap<String, NodeIndex>,
    adjacency: Vec<Vec<NodeIndex>>,
    /// `incident[i][k]` is the edge joining node `i` and `adjacency[i][k]`
    incident: Vec<Vec<EdgeIndex>>,
    interaction_totals: Vec<u64>,
}

/// Validate `nodes` and `edges` and build the graph.
///
/// Fails if a node id repeats, an edge references an unknown id, an edge has
/// weight 0 or no per-type record, an edge connects a node to itself, or the
/// same unordered pair appears twice.
pub fn build_graph(
    nodes: Vec<PersonNode>,
    edges: Vec<Interaction>,
) -> Result<RelationshipGraph, InvalidGraphError> {
    validate(&nodes, &edges)?;
    Ok(RelationshipGraph::from_validated(nodes, edges))
}

fn validate(nodes: &[PersonNode], edges: &[Interaction]) -> Result<(), InvalidGraphError> {
    let mut known: HashSet<&str> = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !known.insert(node.id.as_str()) {
            return Err(InvalidGraphError::DuplicateNode {
                id: node.id.clone(),
            });
        }
    }

    let mut pairs: HashSet<(&str, &str)> = HashSet::with_capacity(edges.len());
    for edge in edges {
        let (s, t) = (edge.source_id.as_str(), edge.target_id.as_str());
        for endpoint in [s, t] {
            if !known.contains(endpoint) {
                return Err(InvalidGraphError::DanglingEdge {
                    source_id: s.to_string(),
                    target_id: t.to_string(),
                    missing: endpoint.to_string(),
                });
            }
        }
        if s == t {
            return Err(InvalidGraphError::SelfLoop { id: s.to_string() });
        }
        if edge.weight < 1 {
            return Err(InvalidGraphError::NonPositiveWeight {
                source_id: s.to_string(),
                target_id: t.to_string(),
                weight: edge.weight,
            });
        }
        if edge.types.is_empty() {
            return Err(InvalidGraphError::EmptyInteraction {
                source_id: s.to_string(),
                target_id: t.to_string(),
            });
        }
        let key = if s < t { (s, t) } else { (t, s) };
        if !pairs.insert(key) {
            return Err(InvalidGraphError::DuplicateEdge {
                source_id: s.to_string(),
                target_id: t.to_string(),
            });
        }
    }
    Ok(())
}

impl RelationshipGraph {
    /// Assemble a graph from parts already known to satisfy every invariant.
    pub(crate) fn from_validated(nodes: Vec<PersonNode>, edges: Vec<Interaction>) -> Self {
        let mut graph: UnGraph<PersonNode, Interaction> =
            UnGraph::with_capacity(nodes.len(), edges.len());
        let mut id_to_index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id.clone();
            let idx = graph.add_node(node);
            id_to_index.insert(id, idx);
        }

        let mut adjacency: Vec<Vec<NodeIndex>> = vec![Vec::new(); graph.node_count()];
        let mut incident: Vec<Vec<EdgeIndex>> = vec![Vec::new(); graph.node_count()];
        let mut interaction_totals = vec![0u64; graph.node_count()];
        for edge in edges {
            let (Some(&a), Some(&b)) = (
                id_to_index.get(&edge.source_id),
                id_to_index.get(&edge.target_id),
            ) else {
                continue;
            };
            let total = edge.type_count_total();
            adjacency[a.index()].push(b);
            adjacency[b.index()].push(a);
            interaction_totals[a.index()] += total;
            interaction_totals[b.index()] += total;
            let e = graph.add_edge(a, b, edge);
            incident[a.index()].push(e);
            incident[b.index()].push(e);
        }

        Self {
            graph,
            id_to_index,
            adjacency,
            incident,
            interaction_totals,
        }
    }

    /// An empty graph.
    pub fn empty() -> Self {
        Self::from_validated(Vec::new(), Vec::new())
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &PersonNode> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in input order.
    pub fn edges(&self) -> impl Iterator<Item = &Interaction> + '_ {
        self.graph.edge_indices().map(move |idx| &self.graph[idx])
    }

    /// Get a node by id.
    pub fn node(&self, id: &str) -> Option<&PersonNode> {
        let idx = self.id_to_index.get(id)?;
        self.graph.node_weight(*idx)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Get the `NodeIndex` for an id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &PersonNode {
        &self.graph[idx]
    }

    /// Ordered neighbours of the node at `idx`.
    pub(crate) fn adjacent(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.adjacency[idx.index()]
    }

    /// Neighbours of the node at `idx` with their connecting edges, in
    /// adjacency order.
    pub(crate) fn incident(
        &self,
        idx: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, &Interaction)> + '_ {
        self.adjacency[idx.index()]
            .iter()
            .zip(&self.incident[idx.index()])
            .map(move |(&neighbor, &edge)| (neighbor, &self.graph[edge]))
    }

    /// Ids of the direct neighbours of `id`, in adjacency order.
    pub fn neighbor_ids(&self, id: &str) -> Option<Vec<&str>> {
        let idx = self.index_of(id)?;
        Some(
            self.adjacent(idx)
                .iter()
                .map(|&n| self.graph[n].id.as_str())
                .collect(),
        )
    }

    /// Number of distinct neighbours of `id`.
    pub fn degree(&self, id: &str) -> Option<usize> {
        self.index_of(id).map(|idx| self.adjacent(idx).len())
    }

    /// The edge joining `a` and `b`, in either orientation.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Interaction> {
        let (a, b) = (self.index_of(a)?, self.index_of(b)?);
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge)
    }

    /// Sum of per-type counts over all edges incident to `id`.
    pub fn interaction_total(&self, id: &str) -> Option<u64> {
        self.index_of(id)
            .map(|idx| self.interaction_totals[idx.index()])
    }

    /// Copy the graph back into snapshot form.
    pub fn to_snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().cloned().collect(),
        }
    }
}

impl Default for RelationshipGraph {
    fn default() -> Self {
        Self::empty()
    }
}

impl NetworkSnapshot {
    /// Validate and build the graph for this snapshot.
    pub fn into_graph(self) -> Result<RelationshipGraph, InvalidGraphError> {
        build_graph(self.nodes, self.edges)
    }
}

// ============================================================================
// Tests
// ============================================================================
