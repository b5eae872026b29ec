//! Analysis session.
//!
//! An [`AnalysisSession`] is owned by the caller (one per loaded snapshot).
//! It holds the immutable full graph and memoizes filtered graphs keyed by
//! their [`FilterParameters`], so repeated UI queries with unchanged
//! controls reuse the same filtered view. The memo holds at most
//! `max_cached_filters` graphs; past that the oldest entry is evicted. The
//! algorithms themselves stay stateless.
//!
//! The session is `Send + Sync`; concurrent queries share cached filtered
//! graphs through `Arc` and never write to them.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::algorithms;
use super::error::{AnalysisError, InvalidGraphError};
use super::filter::{filter_graph, FilteredGraph};
use super::graph::RelationshipGraph;
use super::models::{
    AnalyticsConfig, CentralityScores, CommunityAssignment, FilterParameters, NetworkReport,
    NetworkSnapshot, NetworkSummary, PathOutcome, PersonDetails,
};

/// A memoized filtered graph and the order it was inserted in.
struct CachedFilter {
    inserted: u64,
    graph: Arc<FilteredGraph>,
}

/// Caller-owned analysis state for one snapshot.
pub struct AnalysisSession {
    snapshot: Arc<RelationshipGraph>,
    filtered: DashMap<FilterParameters, CachedFilter>,
    next_insert: AtomicU64,
    config: AnalyticsConfig,
}

impl AnalysisSession {
    /// Create a session over an already validated graph.
    pub fn new(graph: RelationshipGraph, config: AnalyticsConfig) -> Self {
        Self {
            snapshot: Arc::new(graph),
            filtered: DashMap::new(),
            next_insert: AtomicU64::new(0),
            config,
        }
    }

    /// Validate a raw snapshot and open a session over it.
    pub fn from_snapshot(
        snapshot: NetworkSnapshot,
        config: AnalyticsConfig,
    ) -> Result<Self, InvalidGraphError> {
        Ok(Self::new(snapshot.into_graph()?, config))
    }

    /// The full, unfiltered graph.
    pub fn graph(&self) -> &RelationshipGraph {
        &self.snapshot
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// The filtered view for `params`, computed once per parameter set
    /// while it stays in the memo.
    pub fn filtered(&self, params: &FilterParameters) -> Arc<FilteredGraph> {
        if let Some(hit) = self.filtered.get(params) {
            tracing::debug!("Filtered graph cache hit");
            return Arc::clone(&hit.value().graph);
        }

        let computed = filter_graph(&self.snapshot, params).into_shared();
        self.evict_oldest_while_full();
        let inserted = self.next_insert.fetch_add(1, Ordering::Relaxed);
        let entry = self
            .filtered
            .entry(params.clone())
            .or_insert(CachedFilter {
                inserted,
                graph: computed,
            });
        Arc::clone(&entry.value().graph)
    }

    /// Make room for one more memoized graph.
    fn evict_oldest_while_full(&self) {
        let limit = self.config.max_cached_filters.max(1);
        while self.filtered.len() >= limit {
            let oldest = self
                .filtered
                .iter()
                .min_by_key(|entry| entry.value().inserted)
                .map(|entry| entry.key().clone());
            let Some(key) = oldest else {
                break;
            };
            self.filtered.remove(&key);
            tracing::debug!("Evicted filtered graph (min_weight={})", key.min_weight);
        }
    }

    /// Number of memoized filtered graphs.
    pub fn cached_filters(&self) -> usize {
        self.filtered.len()
    }

    /// Drop every memoized filtered graph.
    pub fn clear_cache(&self) {
        self.filtered.clear();
    }

    /// Shortest hop-count path inside the filtered graph.
    pub fn shortest_path(&self, params: &FilterParameters, from: &str, to: &str) -> PathOutcome {
        algorithms::shortest_path(&self.filtered(params), from, to)
    }

    /// Label propagation communities of the filtered graph.
    pub fn communities(&self, params: &FilterParameters) -> CommunityAssignment {
        algorithms::label_propagation(&self.filtered(params))
    }

    /// Degree and betweenness of the filtered graph.
    ///
    /// Refused when the filtered graph has more nodes than
    /// `max_centrality_nodes`.
    pub fn centrality(
        &self,
        params: &FilterParameters,
    ) -> Result<CentralityScores, AnalysisError> {
        let graph = self.filtered(params);
        self.check_centrality_limit(&graph)?;
        Ok(algorithms::compute_centrality(&graph))
    }

    /// A person and their visible connections.
    pub fn person_details(&self, params: &FilterParameters, id: &str) -> Option<PersonDetails> {
        algorithms::person_details(&self.filtered(params), id)
    }

    pub fn summary(&self, params: &FilterParameters) -> NetworkSummary {
        algorithms::summarize(&self.filtered(params))
    }

    /// Every analysis over the filtered graph, subject to the centrality limit.
    pub fn report(&self, params: &FilterParameters) -> Result<NetworkReport, AnalysisError> {
        let graph = self.filtered(params);
        self.check_centrality_limit(&graph)?;
        let report = algorithms::compute_all(&graph);
        tracing::info!(
            "Network report: {} nodes, {} edges, {} communities in {}ms",
            report.summary.node_count,
            report.summary.edge_count,
            report.communities.communities.len(),
            report.computation_ms
        );
        Ok(report)
    }

    fn check_centrality_limit(&self, graph: &FilteredGraph) -> Result<(), AnalysisError> {
        let limit = self.config.max_centrality_nodes;
        if graph.node_count() > limit {
            tracing::warn!(
                "Refusing centrality on {} nodes (limit {})",
                graph.node_count(),
                limit
            );
            return Err(AnalysisError::GraphTooLarge {
                nodes: graph.node_count(),
                limit,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
