//! Relationship network algorithms.
//!
//! Implements the analytical queries over a (filtered) relationship graph:
//! - **Shortest path**: unweighted BFS ("fewest intermediaries")
//! - **Community detection**: asynchronous label propagation
//! - **Degree centrality**: distinct neighbour count
//! - **Betweenness centrality**: Brandes' algorithm, unweighted, unnormalized
//! - **Connected components**: BFS over the undirected adjacency
//! - **Person details**: a node's connections ranked by edge weight
//!
//! Every function is pure: it reads the graph and returns owned results.
//! Edge weights never influence topology; they are only used for ranking
//! connections. Traversal order follows the graph's ordered adjacency, so
//! results are reproducible for a given snapshot.

use petgraph::graph::NodeIndex;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use super::graph::RelationshipGraph;
use super::models::{
    CentralityScores, Community, CommunityAssignment, ComponentInfo, Connection, NetworkReport,
    NetworkSummary, PathOutcome, PersonDetails,
};

/// Upper bound on label propagation passes.
pub const LABEL_PROPAGATION_MAX_PASSES: usize = 10;

// ============================================================================
// Shortest path (BFS)
// ============================================================================

/// Find one shortest path between two nodes, counting hops.
///
/// Among equally short paths the one found first by BFS over the ordered
/// adjacency is returned; callers should only rely on it being shortest.
pub fn shortest_path(graph: &RelationshipGraph, from_id: &str, to_id: &str) -> PathOutcome {
    let Some(from) = graph.index_of(from_id) else {
        return PathOutcome::MissingEndpoint {
            id: from_id.to_string(),
        };
    };
    let Some(to) = graph.index_of(to_id) else {
        return PathOutcome::MissingEndpoint {
            id: to_id.to_string(),
        };
    };
    if from == to {
        return PathOutcome::Found {
            path: vec![from_id.to_string()],
        };
    }

    let n = graph.node_count();
    let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    visited[from.index()] = true;
    queue.push_back(from);

    'search: while let Some(current) = queue.pop_front() {
        for &neighbor in graph.adjacent(current) {
            if visited[neighbor.index()] {
                continue;
            }
            visited[neighbor.index()] = true;
            parent[neighbor.index()] = Some(current);
            if neighbor == to {
                break 'search;
            }
            queue.push_back(neighbor);
        }
    }

    if !visited[to.index()] {
        return PathOutcome::NoPath;
    }

    let mut path = vec![graph.node_at(to).id.clone()];
    let mut cursor = to;
    while let Some(prev) = parent[cursor.index()] {
        path.push(graph.node_at(prev).id.clone());
        cursor = prev;
    }
    path.reverse();
    PathOutcome::Found { path }
}

// ============================================================================
// Community detection: asynchronous label propagation
// ============================================================================

/// Group nodes by asynchronous label propagation.
///
/// Every node starts with its own id as label. Each pass visits nodes in
/// graph order and sets the label to the most frequent label among its
/// neighbours, reading labels already updated earlier in the same pass.
/// Among equally frequent labels the one first encountered in adjacency
/// order wins. Stops after a pass with no change or after
/// [`LABEL_PROPAGATION_MAX_PASSES`] passes. Isolated nodes keep their own
/// label and form singleton communities.
///
/// The tie-break depends on adjacency order, so two snapshots listing the
/// same edges in different orders can yield different groupings.
pub fn label_propagation(graph: &RelationshipGraph) -> CommunityAssignment {
    let n = graph.node_count();
    if n == 0 {
        return CommunityAssignment::default();
    }

    // Labels are node positions; the label id is the node at that position.
    let mut labels: Vec<usize> = (0..n).collect();
    let mut passes = 0;
    let mut counts: Vec<(usize, usize)> = Vec::new();
    let mut slot_of: HashMap<usize, usize> = HashMap::new();

    while passes < LABEL_PROPAGATION_MAX_PASSES {
        passes += 1;
        let mut changed = false;

        for i in 0..n {
            let neighbors = graph.adjacent(NodeIndex::new(i));
            if neighbors.is_empty() {
                continue;
            }

            // Insertion-ordered counts so ties resolve to first encountered
            counts.clear();
            slot_of.clear();
            for neighbor in neighbors {
                let label = labels[neighbor.index()];
                match slot_of.entry(label) {
                    Entry::Occupied(slot) => counts[*slot.get()].1 += 1,
                    Entry::Vacant(slot) => {
                        slot.insert(counts.len());
                        counts.push((label, 1));
                    }
                }
            }

            let mut best = counts[0];
            for &candidate in &counts[1..] {
                if candidate.1 > best.1 {
                    best = candidate;
                }
            }

            if best.0 != labels[i] {
                labels[i] = best.0;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    // Group by label in first-appearance order
    let mut position_of: HashMap<usize, usize> = HashMap::new();
    let mut communities: Vec<Community> = Vec::new();
    let mut membership = HashMap::with_capacity(n);

    for (i, &label) in labels.iter().enumerate() {
        let member = graph.node_at(NodeIndex::new(i)).id.clone();
        let label_id = graph.node_at(NodeIndex::new(label)).id.clone();
        let pos = *position_of.entry(label).or_insert_with(|| {
            communities.push(Community {
                id: label_id.clone(),
                size: 0,
                members: Vec::new(),
            });
            communities.len() - 1
        });
        communities[pos].size += 1;
        communities[pos].members.push(member.clone());
        membership.insert(member, label_id);
    }
    communities.sort_by_key(|c| std::cmp::Reverse(c.size));

    tracing::debug!(
        "Label propagation: {} nodes → {} communities in {} passes",
        n,
        communities.len(),
        passes
    );

    CommunityAssignment {
        communities,
        membership,
        passes,
    }
}

// ============================================================================
// Centrality
// ============================================================================

/// Number of distinct neighbours of every node.
pub fn degree_centrality(graph: &RelationshipGraph) -> HashMap<String, usize> {
    graph
        .nodes()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), graph.adjacent(NodeIndex::new(i)).len()))
        .collect()
}

/// Betweenness centrality via Brandes' algorithm (unweighted).
///
/// One BFS per source node accumulates shortest-path counts (`sigma`) and
/// predecessor lists; dependencies are then back-propagated in reverse BFS
/// order and added to every node other than the source.
///
/// Scores are raw sums over all source nodes. Because the graph is
/// undirected, each unordered pair `{s, t}` contributes once from `s` and
/// once from `t`. Nothing is divided by a normalizing constant.
pub fn betweenness_centrality(graph: &RelationshipGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    let mut betweenness = vec![0.0f64; n];

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut pred: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut delta = vec![0.0f64; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        for p in pred.iter_mut() {
            p.clear();
        }
        sigma.fill(0.0);
        dist.fill(-1);
        delta.fill(0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for w in graph.adjacent(NodeIndex::new(v)) {
                let w = w.index();
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    pred[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &v in &pred[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                betweenness[w] += delta[w];
            }
        }
    }

    graph
        .nodes()
        .zip(betweenness)
        .map(|(node, score)| (node.id.clone(), score))
        .collect()
}

/// Degree and betweenness for every node of the graph.
///
/// Cost is O(V·(V+E)); callers guarding large graphs should check the node
/// count first (see [`AnalysisSession`](super::session::AnalysisSession)).
pub fn compute_centrality(graph: &RelationshipGraph) -> CentralityScores {
    let start = std::time::Instant::now();
    let scores = CentralityScores {
        degree: degree_centrality(graph),
        betweenness: betweenness_centrality(graph),
    };
    tracing::debug!(
        "Centrality over {} nodes / {} edges in {}ms",
        graph.node_count(),
        graph.edge_count(),
        start.elapsed().as_millis()
    );
    scores
}

// ============================================================================
// Connected components
// ============================================================================

/// Identify connected components.
///
/// Components are sorted by size descending; every component of maximal
/// size is flagged `is_main`.
pub fn connected_components(graph: &RelationshipGraph) -> Vec<ComponentInfo> {
    let n = graph.node_count();
    let mut component_of: Vec<Option<u32>> = vec![None; n];
    let mut components: Vec<ComponentInfo> = Vec::new();

    for start in 0..n {
        if component_of[start].is_some() {
            continue;
        }
        let id = components.len() as u32;
        let mut members = Vec::new();
        let mut queue = VecDeque::new();
        component_of[start] = Some(id);
        queue.push_back(NodeIndex::new(start));

        while let Some(current) = queue.pop_front() {
            members.push(graph.node_at(current).id.clone());
            for &neighbor in graph.adjacent(current) {
                if component_of[neighbor.index()].is_none() {
                    component_of[neighbor.index()] = Some(id);
                    queue.push_back(neighbor);
                }
            }
        }

        components.push(ComponentInfo {
            id,
            size: members.len(),
            members,
            is_main: false,
        });
    }

    let max_size = components.iter().map(|c| c.size).max().unwrap_or(0);
    for component in components.iter_mut() {
        component.is_main = component.size == max_size;
    }
    components.sort_by_key(|c| std::cmp::Reverse(c.size));
    components
}

// ============================================================================
// Person details & summary
// ============================================================================

/// A person with their direct connections, heaviest edge first.
///
/// Returns `None` when the id is not in the graph.
pub fn person_details(graph: &RelationshipGraph, id: &str) -> Option<PersonDetails> {
    let idx = graph.index_of(id)?;
    let mut connections: Vec<Connection> = graph
        .incident(idx)
        .map(|(neighbor, edge)| Connection {
            person: graph.node_at(neighbor).clone(),
            edge: edge.clone(),
        })
        .collect();
    connections.sort_by_key(|c| std::cmp::Reverse(c.edge.weight));

    Some(PersonDetails {
        person: graph.node_at(idx).clone(),
        interaction_total: graph.interaction_total(id).unwrap_or(0),
        total_connections: connections.len(),
        connections,
    })
}

/// Node, edge and component counts of the graph.
pub fn summarize(graph: &RelationshipGraph) -> NetworkSummary {
    let components = connected_components(graph);
    summarize_with(graph, &components)
}

fn summarize_with(graph: &RelationshipGraph, components: &[ComponentInfo]) -> NetworkSummary {
    let primary_count = graph.nodes().filter(|n| n.is_primary()).count();
    NetworkSummary {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        primary_count,
        secondary_count: graph.node_count() - primary_count,
        total_weight: graph.edges().map(|e| e.weight).sum(),
        component_count: components.len(),
        largest_component: components.first().map(|c| c.size).unwrap_or(0),
    }
}

// ============================================================================
// Full report: compute_all
// ============================================================================

/// Run every analysis and assemble a complete [`NetworkReport`].
///
/// Execution order:
/// 1. Connected components (+ summary)
/// 2. Label propagation
/// 3. Degree and betweenness centrality
pub fn compute_all(graph: &RelationshipGraph) -> NetworkReport {
    let start = std::time::Instant::now();

    let components = connected_components(graph);
    let summary = summarize_with(graph, &components);
    let communities = label_propagation(graph);
    let centrality = compute_centrality(graph);

    let elapsed = start.elapsed();

    NetworkReport {
        summary,
        communities,
        centrality,
        components,
        computation_ms: elapsed.as_millis() as u64,
        computed_at: chrono::Utc::now(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::graph::build_graph;
    use crate::network::models::{Interaction, InteractionRecord, InteractionType, PersonNode};

    fn link(a: &str, b: &str) -> Interaction {
        Interaction::new(
            a,
            b,
            vec![InteractionRecord::new(InteractionType::PhoneCall, 1)],
        )
    }

    fn weighted(a: &str, b: &str, weight: u64) -> Interaction {
        Interaction::new(
            a,
            b,
            vec![InteractionRecord::new(InteractionType::Chat, weight)],
        )
    }

    fn graph_of(ids: &[&str], edges: Vec<Interaction>) -> RelationshipGraph {
        let nodes = ids.iter().map(|id| PersonNode::primary(*id, *id)).collect();
        build_graph(nodes, edges).unwrap()
    }

    /// Build a linear chain: node_0 -- node_1 -- ... -- node_{n-1}
    fn make_chain_graph(n: usize) -> RelationshipGraph {
        let names: Vec<String> = (0..n).map(|i| format!("node_{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let edges = (0..n - 1).map(|i| link(&names[i], &names[i + 1])).collect();
        graph_of(&refs, edges)
    }

    /// Build a star graph: center -- [leaf_0, ..., leaf_{n-1}]
    fn make_star_graph(n_leaves: usize) -> RelationshipGraph {
        let mut names = vec!["center".to_string()];
        names.extend((0..n_leaves).map(|i| format!("leaf_{}", i)));
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let edges = names[1..].iter().map(|leaf| link("center", leaf)).collect();
        graph_of(&refs, edges)
    }

    /// Build a complete graph on `prefix_0 .. prefix_{size-1}` (edge list only).
    fn clique_edges(prefix: &str, size: usize) -> (Vec<String>, Vec<Interaction>) {
        let names: Vec<String> = (0..size).map(|i| format!("{}_{}", prefix, i)).collect();
        let mut edges = Vec::new();
        for i in 0..size {
            for j in (i + 1)..size {
                edges.push(link(&names[i], &names[j]));
            }
        }
        (names, edges)
    }

    /// Two cliques, optionally joined by a single bridge edge a_0 -- b_0.
    fn make_two_cliques(size: usize, bridged: bool) -> RelationshipGraph {
        let (mut names, mut edges) = clique_edges("a", size);
        let (b_names, b_edges) = clique_edges("b", size);
        names.extend(b_names);
        edges.extend(b_edges);
        if bridged {
            edges.push(link("a_0", "b_0"));
        }
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        graph_of(&refs, edges)
    }

    // --- Shortest path ---

    #[test]
    fn test_shortest_path_chain_exact() {
        let g = graph_of(
            &["A", "B", "C", "D"],
            vec![link("A", "B"), link("B", "C"), link("C", "D")],
        );
        assert_eq!(
            shortest_path(&g, "A", "D"),
            PathOutcome::Found {
                path: vec!["A".into(), "B".into(), "C".into(), "D".into()]
            }
        );
    }

    #[test]
    fn test_shortest_path_same_node() {
        let g = make_chain_graph(3);
        assert_eq!(
            shortest_path(&g, "node_1", "node_1"),
            PathOutcome::Found {
                path: vec!["node_1".into()]
            }
        );
    }

    #[test]
    fn test_shortest_path_prefers_fewer_hops_over_weight() {
        // A-D directly with weight 1; A-B-C-D with heavy edges
        let g = graph_of(
            &["A", "B", "C", "D"],
            vec![
                weighted("A", "B", 50),
                weighted("B", "C", 50),
                weighted("C", "D", 50),
                weighted("A", "D", 1),
            ],
        );
        let path = shortest_path(&g, "A", "D").into_path().unwrap();
        assert_eq!(path, vec!["A".to_string(), "D".to_string()]);
    }

    #[test]
    fn test_shortest_path_tie_breaks_by_adjacency_order() {
        // Diamond: A-B-D and A-C-D; A's first edge goes to B
        let g = graph_of(
            &["A", "B", "C", "D"],
            vec![link("A", "B"), link("A", "C"), link("B", "D"), link("C", "D")],
        );
        let outcome = shortest_path(&g, "A", "D");
        assert_eq!(outcome.hops(), Some(2));
        assert_eq!(
            outcome.into_path().unwrap(),
            vec!["A".to_string(), "B".to_string(), "D".to_string()]
        );
    }

    #[test]
    fn test_shortest_path_symmetric_length() {
        let g = make_two_cliques(4, true);
        let forward = shortest_path(&g, "a_3", "b_2");
        let backward = shortest_path(&g, "b_2", "a_3");
        assert_eq!(forward.hops(), Some(3));
        assert_eq!(forward.hops(), backward.hops());
    }

    #[test]
    fn test_shortest_path_disconnected() {
        let g = make_two_cliques(3, false);
        assert_eq!(shortest_path(&g, "a_0", "b_0"), PathOutcome::NoPath);
    }

    #[test]
    fn test_shortest_path_missing_endpoint() {
        let g = make_chain_graph(3);
        assert_eq!(
            shortest_path(&g, "node_0", "ghost"),
            PathOutcome::MissingEndpoint { id: "ghost".into() }
        );
        assert_eq!(
            shortest_path(&g, "ghost", "node_0"),
            PathOutcome::MissingEndpoint { id: "ghost".into() }
        );
    }

    // --- Label propagation ---

    #[test]
    fn test_label_propagation_chain_converges_deterministically() {
        let g = graph_of(
            &["a", "b", "c", "d"],
            vec![link("a", "b"), link("b", "c"), link("c", "d")],
        );
        let result = label_propagation(&g);

        assert_eq!(result.communities.len(), 1);
        assert_eq!(result.communities[0].id, "b");
        assert_eq!(result.communities[0].members, vec!["a", "b", "c", "d"]);
        assert_eq!(result.passes, 2);

        // Same input, same output
        let again = label_propagation(&g);
        assert_eq!(again.communities, result.communities);
    }

    #[test]
    fn test_label_propagation_disjoint_components_never_mix() {
        let g = make_two_cliques(4, false);
        let result = label_propagation(&g);

        assert!(result.communities.len() >= 2);
        for community in &result.communities {
            let in_a = community.members.iter().filter(|m| m.starts_with("a_")).count();
            assert!(
                in_a == 0 || in_a == community.members.len(),
                "Community {} spans both components: {:?}",
                community.id,
                community.members
            );
        }
        for i in 1..4 {
            assert!(result.same_community("a_0", &format!("a_{}", i)));
            assert!(result.same_community("b_0", &format!("b_{}", i)));
        }
        assert!(!result.same_community("a_0", "b_0"));
    }

    #[test]
    fn test_label_propagation_isolated_node_is_singleton() {
        let g = graph_of(&["x", "y", "solo"], vec![link("x", "y")]);
        let result = label_propagation(&g);

        assert_eq!(result.community_of("solo"), Some("solo"));
        let solo = result
            .communities
            .iter()
            .find(|c| c.id == "solo")
            .unwrap();
        assert_eq!(solo.members, vec!["solo"]);
    }

    #[test]
    fn test_label_propagation_covers_every_node_once() {
        let g = make_two_cliques(5, true);
        let result = label_propagation(&g);

        assert!(result.passes <= LABEL_PROPAGATION_MAX_PASSES);
        assert_eq!(result.membership.len(), g.node_count());
        let total: usize = result.communities.iter().map(|c| c.size).sum();
        assert_eq!(total, g.node_count());

        let mut all: Vec<&String> = result.communities.iter().flat_map(|c| &c.members).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), g.node_count());
    }

    #[test]
    fn test_label_propagation_sorted_by_size() {
        // Triangle + pair + isolated node
        let g = graph_of(
            &["p", "q", "t1", "t2", "t3", "iso"],
            vec![link("p", "q"), link("t1", "t2"), link("t2", "t3"), link("t1", "t3")],
        );
        let result = label_propagation(&g);
        let sizes: Vec<usize> = result.communities.iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![3, 2, 1]);
    }

    #[test]
    fn test_label_propagation_empty_graph() {
        let result = label_propagation(&RelationshipGraph::empty());
        assert!(result.communities.is_empty());
        assert!(result.membership.is_empty());
        assert_eq!(result.passes, 0);
    }

    #[test]
    fn test_label_propagation_hub_ties_follow_adjacency() {
        // Every leaf label appears once around the center, so the center
        // takes leaf_0 and the whole star follows it
        let g = make_star_graph(3000);
        let result = label_propagation(&g);

        assert_eq!(result.communities.len(), 1);
        assert_eq!(result.communities[0].id, "leaf_0");
        assert_eq!(result.communities[0].size, 3001);
        assert_eq!(result.community_of("center"), Some("leaf_0"));
        assert_eq!(result.community_of("leaf_2999"), Some("leaf_0"));
        assert_eq!(result.passes, 2);
    }

    // --- Centrality ---

    #[test]
    fn test_degree_matches_adjacency() {
        let g = make_two_cliques(4, true);
        let degree = degree_centrality(&g);
        for node in g.nodes() {
            assert_eq!(degree[&node.id], g.neighbor_ids(&node.id).unwrap().len());
        }
        assert_eq!(degree["a_0"], 4);
        assert_eq!(degree["a_1"], 3);
    }

    #[test]
    fn test_betweenness_chain_of_three() {
        let g = graph_of(&["A", "B", "C"], vec![link("A", "B"), link("B", "C")]);
        let bc = betweenness_centrality(&g);

        assert_eq!(bc["A"], 0.0);
        assert_eq!(bc["C"], 0.0);
        // A→C and C→A both pass through B
        assert!((bc["B"] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_betweenness_chain_middle_highest() {
        let g = make_chain_graph(5);
        let bc = betweenness_centrality(&g);

        assert_eq!(bc.len(), 5);
        assert!(bc["node_2"] > bc["node_1"]);
        assert!(bc["node_1"] > bc["node_0"]);
        // node_2 separates {0,1} from {3,4}: 4 ordered pairs each way
        assert!((bc["node_2"] - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_betweenness_star_center() {
        let g = make_star_graph(5);
        let bc = betweenness_centrality(&g);

        // Every ordered leaf pair routes through the center: 5 * 4
        assert!((bc["center"] - 20.0).abs() < 1e-9);
        for i in 0..5 {
            assert_eq!(bc[&format!("leaf_{}", i)], 0.0);
        }
    }

    #[test]
    fn test_betweenness_splits_between_equal_paths() {
        // Square A-B-D-C-A: two shortest paths between A and D
        let g = graph_of(
            &["A", "B", "C", "D"],
            vec![link("A", "B"), link("B", "D"), link("D", "C"), link("C", "A")],
        );
        let bc = betweenness_centrality(&g);
        for id in ["A", "B", "C", "D"] {
            assert!((bc[id] - 1.0).abs() < 1e-9, "{} = {}", id, bc[id]);
        }
    }

    #[test]
    fn test_centrality_covers_isolated_nodes() {
        let g = graph_of(&["x", "y", "solo"], vec![link("x", "y")]);
        let scores = compute_centrality(&g);
        assert_eq!(scores.degree.len(), 3);
        assert_eq!(scores.betweenness.len(), 3);
        assert_eq!(scores.degree["solo"], 0);
        assert_eq!(scores.betweenness["solo"], 0.0);
    }

    #[test]
    fn test_centrality_empty_graph() {
        let scores = compute_centrality(&RelationshipGraph::empty());
        assert!(scores.degree.is_empty());
        assert!(scores.betweenness.is_empty());
    }

    #[test]
    fn test_bridge_node_ranks_first() {
        let g = make_two_cliques(4, true);
        let scores = compute_centrality(&g);
        let ranked = scores.ranked_by_betweenness(2);
        let top: Vec<&str> = ranked.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(top, vec!["a_0", "b_0"]);
    }

    // --- Connected components ---

    #[test]
    fn test_connected_components_disconnected() {
        let g = graph_of(
            &["c1_a", "c1_b", "c1_c", "c2_x", "c2_y"],
            vec![link("c1_a", "c1_b"), link("c1_b", "c1_c"), link("c2_x", "c2_y")],
        );
        let components = connected_components(&g);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].size, 3);
        assert!(components[0].is_main);
        assert_eq!(components[1].size, 2);
        assert!(!components[1].is_main);
        assert_eq!(components[1].members, vec!["c2_x", "c2_y"]);
    }

    #[test]
    fn test_connected_components_single() {
        let components = connected_components(&make_chain_graph(5));
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].size, 5);
        assert!(components[0].is_main);
    }

    // --- Person details & summary ---

    #[test]
    fn test_person_details_sorted_by_weight() {
        let g = graph_of(
            &["me", "light", "heavy", "medium", "stranger"],
            vec![
                weighted("me", "light", 1),
                weighted("heavy", "me", 9),
                weighted("me", "medium", 4),
            ],
        );
        let details = person_details(&g, "me").unwrap();

        assert_eq!(details.total_connections, 3);
        assert_eq!(details.interaction_total, 14);
        let order: Vec<&str> = details
            .connections
            .iter()
            .map(|c| c.person.id.as_str())
            .collect();
        assert_eq!(order, vec!["heavy", "medium", "light"]);
        assert_eq!(details.connections[0].edge.weight, 9);

        assert_eq!(person_details(&g, "stranger").unwrap().total_connections, 0);
        assert!(person_details(&g, "nobody").is_none());
    }

    #[test]
    fn test_person_details_hub_keeps_adjacency_order_on_ties() {
        let g = make_star_graph(2000);
        let details = person_details(&g, "center").unwrap();

        assert_eq!(details.total_connections, 2000);
        assert_eq!(details.connections[0].person.id, "leaf_0");
        assert_eq!(details.connections[1999].person.id, "leaf_1999");
        assert!(details
            .connections
            .iter()
            .all(|c| c.edge.other_end("center") == Some(c.person.id.as_str())));
    }

    #[test]
    fn test_summarize_counts_kinds_and_components() {
        let g = build_graph(
            vec![
                PersonNode::primary("p", "P"),
                PersonNode::secondary("s", "S"),
                PersonNode::secondary("t", "T"),
            ],
            vec![weighted("p", "s", 3)],
        )
        .unwrap();
        let summary = summarize(&g);

        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.edge_count, 1);
        assert_eq!(summary.primary_count, 1);
        assert_eq!(summary.secondary_count, 2);
        assert_eq!(summary.total_weight, 3);
        assert_eq!(summary.component_count, 2);
        assert_eq!(summary.largest_component, 2);
    }

    // --- compute_all ---

    #[test]
    fn test_compute_all_assembles_everything() {
        let g = make_two_cliques(4, true);
        let report = compute_all(&g);

        assert_eq!(report.summary.node_count, 8);
        assert_eq!(report.summary.edge_count, 13);
        assert_eq!(report.components.len(), 1);
        assert_eq!(report.centrality.degree.len(), 8);
        assert_eq!(report.communities.membership.len(), 8);
    }

    #[test]
    fn test_compute_all_empty_graph() {
        let report = compute_all(&RelationshipGraph::empty());
        assert_eq!(report.summary, NetworkSummary::default());
        assert!(report.components.is_empty());
        assert!(report.communities.communities.is_empty());
    }

    // --- Benchmark Test ---

    #[test]
    fn test_benchmark_centrality_500_nodes() {
        let names: Vec<String> = (0..500).map(|i| format!("person_{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut edges = Vec::new();
        for i in 0..500 {
            for offset in [1, 7, 31, 127] {
                // No two offsets sum to 500, so every pair is distinct
                let j = (i + offset) % 500;
                edges.push(link(&names[i], &names[j]));
            }
        }
        let g = graph_of(&refs, edges);

        let start = std::time::Instant::now();
        let scores = compute_centrality(&g);
        let elapsed = start.elapsed();

        assert_eq!(g.edge_count(), 2000);
        assert_eq!(scores.betweenness.len(), 500);
        assert!(
            elapsed.as_millis() < 10_000,
            "centrality on 500 nodes took {}ms",
            elapsed.as_millis()
        );
    }
}
