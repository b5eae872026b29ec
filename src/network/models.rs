//! Relationship network data models.
//!
//! Defines the complete type system for the analytics engine:
//!
//! ## Input types (snapshot)
//! - [`NodeKind`] / [`PersonNode`]: people in the case network
//! - [`InteractionType`] / [`InteractionRecord`] / [`Interaction`]: aggregated
//!   interactions between two people
//! - [`NetworkSnapshot`]: the `{nodes, edges}` document supplied by the data service
//!
//! ## Query parameters
//! - [`FilterParameters`]: weight threshold, enabled interaction types, secondary visibility
//!
//! ## Output types (analytics)
//! - [`PathOutcome`]: result of a shortest-path query
//! - [`Community`] / [`CommunityAssignment`]: label propagation result
//! - [`CentralityScores`]: degree and betweenness per node
//! - [`ComponentInfo`]: connected component metadata
//! - [`Connection`] / [`PersonDetails`]: neighbourhood of a single person
//! - [`NetworkSummary`] / [`NetworkReport`]: aggregated results
//!
//! ## Configuration
//! - [`AnalyticsConfig`]: safeguards and presentation limits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};

// ============================================================================
// Input types: snapshot supplied by the data service
// ============================================================================

/// Whether a person is case-relevant or an incidental contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Person of interest; always visible regardless of filters
    Primary,
    /// Incidental contact that appears as an edge endpoint
    Secondary,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// A person in the relationship network.
///
/// Only `id` and `kind` influence analytics. The remaining fields are carried
/// through unchanged for result reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonNode {
    /// Opaque unique identifier
    pub id: String,
    /// Human-readable label
    #[serde(rename = "name")]
    pub display_name: String,
    /// Primary or secondary
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Presentation-only classification (defendant, associate, contact, ...)
    #[serde(default)]
    pub role: String,
    /// Devices known to belong to this person
    #[serde(default)]
    pub devices: Vec<String>,
    /// Device owners whose data mentions this person
    #[serde(default)]
    pub appears_on: Vec<String>,
    #[serde(default)]
    pub contact_count: u64,
    #[serde(default)]
    pub call_count: u64,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default)]
    pub email_count: u64,
    /// Fields the data service attaches that analytics never reads
    /// (`case_files`, `total_mentions`, ...), echoed back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersonNode {
    /// Create a node with empty presentation data.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            kind,
            role: String::new(),
            devices: Vec::new(),
            appears_on: Vec::new(),
            contact_count: 0,
            call_count: 0,
            message_count: 0,
            email_count: 0,
            extra: Map::new(),
        }
    }

    pub fn primary(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(id, display_name, NodeKind::Primary)
    }

    pub fn secondary(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(id, display_name, NodeKind::Secondary)
    }

    /// Set the presentation role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn is_primary(&self) -> bool {
        self.kind == NodeKind::Primary
    }
}

/// Kind of interaction aggregated on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    PhoneCall,
    #[serde(alias = "text_message")]
    Chat,
    Email,
    SharedContact,
    SignalGroup,
}

impl InteractionType {
    /// Every interaction type, in declaration order.
    pub const ALL: [InteractionType; 5] = [
        Self::PhoneCall,
        Self::Chat,
        Self::Email,
        Self::SharedContact,
        Self::SignalGroup,
    ];
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhoneCall => write!(f, "phone_call"),
            Self::Chat => write!(f, "chat"),
            Self::Email => write!(f, "email"),
            Self::SharedContact => write!(f, "shared_contact"),
            Self::SignalGroup => write!(f, "signal_group"),
        }
    }
}

impl std::str::FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone_call" | "call" => Ok(Self::PhoneCall),
            "chat" | "text_message" => Ok(Self::Chat),
            "email" => Ok(Self::Email),
            "shared_contact" => Ok(Self::SharedContact),
            "signal_group" => Ok(Self::SignalGroup),
            other => Err(format!("unknown interaction type: {}", other)),
        }
    }
}

/// Per-type aggregate on an edge.
///
/// Metadata (platform, date range, devices) is informational only.
///
/// Serializes in the data service's shape: chat records carry their count
/// as `message_count`, every other type as `count`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InteractionRecord {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Number of interactions of this type (chat records use `message_count`)
    #[serde(default, alias = "message_count")]
    pub count: u64,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub date_range: Option<String>,
    /// Device owners whose data contains these interactions
    #[serde(default, rename = "appears_on_devices", alias = "devices")]
    pub devices: Vec<String>,
    /// Unrecognized keys, echoed back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InteractionRecord {
    pub fn new(kind: InteractionType, count: u64) -> Self {
        Self {
            kind,
            count,
            platform: None,
            date_range: None,
            devices: Vec::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Serialize)]
struct InteractionRecordWire<'a> {
    #[serde(rename = "type")]
    kind: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_range: Option<&'a str>,
    #[serde(skip_serializing_if = "no_devices")]
    appears_on_devices: &'a [String],
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

fn no_devices(devices: &&[String]) -> bool {
    devices.is_empty()
}

impl Serialize for InteractionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let is_chat = self.kind == InteractionType::Chat;
        InteractionRecordWire {
            kind: self.kind,
            count: (!is_chat).then_some(self.count),
            message_count: is_chat.then_some(self.count),
            platform: self.platform.as_deref(),
            date_range: self.date_range.as_deref(),
            appears_on_devices: &self.devices,
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

/// An undirected, aggregated relationship between two people.
///
/// Direction of the underlying records is never used by the algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename = "source")]
    pub source_id: String,
    #[serde(rename = "target")]
    pub target_id: String,
    /// Total interaction count across all types (must be >= 1)
    pub weight: u64,
    /// Ordered per-type breakdown
    #[serde(default)]
    pub types: Vec<InteractionRecord>,
}

impl Interaction {
    /// Create an edge whose weight is the sum of its per-type counts.
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        types: Vec<InteractionRecord>,
    ) -> Self {
        let weight = types.iter().map(|t| t.count).sum();
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            weight,
            types,
        }
    }

    /// Whether any per-type record has the given kind.
    pub fn involves(&self, kind: InteractionType) -> bool {
        self.types.iter().any(|t| t.kind == kind)
    }

    /// Sum of the per-type counts.
    pub fn type_count_total(&self) -> u64 {
        self.types.iter().map(|t| t.count).sum()
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.source_id == id {
            Some(&self.target_id)
        } else if self.target_id == id {
            Some(&self.source_id)
        } else {
            None
        }
    }
}

/// The full `{nodes, edges}` document returned by the network data service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    #[serde(default)]
    pub nodes: Vec<PersonNode>,
    #[serde(default)]
    pub edges: Vec<Interaction>,
}

// ============================================================================
// Query parameters
// ============================================================================

/// Visibility filter derived from UI controls.
///
/// Hashable so callers can memoize filtered graphs per parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParameters {
    /// Edges with `weight < min_weight` are excluded
    pub min_weight: u64,
    /// An edge survives only if one of its records has an enabled type
    pub enabled_types: BTreeSet<InteractionType>,
    /// Keep secondary nodes even when no retained edge touches them
    pub include_secondary: bool,
}

impl Default for FilterParameters {
    /// The identity filter: every edge and node of a valid graph survives.
    fn default() -> Self {
        Self {
            min_weight: 1,
            enabled_types: InteractionType::ALL.into_iter().collect(),
            include_secondary: true,
        }
    }
}

impl FilterParameters {
    pub fn with_min_weight(mut self, min_weight: u64) -> Self {
        self.min_weight = min_weight;
        self
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = InteractionType>) -> Self {
        self.enabled_types = types.into_iter().collect();
        self
    }

    pub fn include_secondary(mut self, include: bool) -> Self {
        self.include_secondary = include;
        self
    }

    /// Edge retention rule: weight threshold AND at least one enabled type.
    pub fn admits(&self, edge: &Interaction) -> bool {
        edge.weight >= self.min_weight
            && edge
                .types
                .iter()
                .any(|t| self.enabled_types.contains(&t.kind))
    }
}

// ============================================================================
// Output types: analytics results
// ============================================================================

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    /// Node ids from source to target inclusive
    Found { path: Vec<String> },
    /// An endpoint is not part of the (filtered) graph
    MissingEndpoint { id: String },
    /// Both endpoints exist but lie in different components
    NoPath,
}

impl PathOutcome {
    /// Collapse to the plain `path | not found` form.
    pub fn into_path(self) -> Option<Vec<String>> {
        match self {
            Self::Found { path } => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Number of edges on the path, if one was found.
    pub fn hops(&self) -> Option<usize> {
        match self {
            Self::Found { path } => Some(path.len().saturating_sub(1)),
            _ => None,
        }
    }
}

/// A group of nodes that converged on the same label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Representative node id (the converged label)
    pub id: String,
    /// Number of members
    pub size: usize,
    /// Member ids in filtered node order
    pub members: Vec<String>,
}

/// Result of label propagation over a graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunityAssignment {
    /// Communities by size descending (ties in first-appearance order)
    pub communities: Vec<Community>,
    /// Node id → community id
    pub membership: HashMap<String, String>,
    /// Number of propagation passes executed
    pub passes: usize,
}

impl CommunityAssignment {
    /// Community id of a node.
    pub fn community_of(&self, id: &str) -> Option<&str> {
        self.membership.get(id).map(String::as_str)
    }

    /// Whether two nodes share a community.
    pub fn same_community(&self, a: &str, b: &str) -> bool {
        match (self.community_of(a), self.community_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

/// Degree and betweenness centrality for every node of a graph.
///
/// Betweenness values are raw Brandes dependency sums accumulated over every
/// source node (each unordered pair contributes in both directions). They are
/// not divided by any normalizing constant and are meant for ranking only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CentralityScores {
    /// Number of distinct neighbours
    pub degree: HashMap<String, usize>,
    /// Unnormalized betweenness
    pub betweenness: HashMap<String, f64>,
}

impl CentralityScores {
    /// Nodes ranked by degree (descending, ties by id), truncated to `limit`.
    pub fn ranked_by_degree(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> =
            self.degree.iter().map(|(id, d)| (id.clone(), *d)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Nodes ranked by betweenness (descending, ties by id), truncated to `limit`.
    pub fn ranked_by_betweenness(&self, limit: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .betweenness
            .iter()
            .map(|(id, b)| (id.clone(), *b))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }
}

/// Metadata about a connected component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Component identifier (discovery order)
    pub id: u32,
    /// Number of nodes in this component
    pub size: usize,
    /// Node ids in this component
    pub members: Vec<String>,
    /// Whether this is the largest component
    pub is_main: bool,
}

/// One neighbour of a person together with the connecting edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub person: PersonNode,
    pub edge: Interaction,
}

/// A person and their direct connections, strongest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub person: PersonNode,
    /// Sum of per-type counts across incident edges
    pub interaction_total: u64,
    pub connections: Vec<Connection>,
    pub total_connections: usize,
}

/// Size and shape of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub primary_count: usize,
    pub secondary_count: usize,
    /// Sum of edge weights
    pub total_weight: u64,
    pub component_count: usize,
    pub largest_component: usize,
}

/// Complete result of running every analysis over one filtered graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkReport {
    pub summary: NetworkSummary,
    pub communities: CommunityAssignment,
    pub centrality: CentralityScores,
    pub components: Vec<ComponentInfo>,
    /// Computation time in milliseconds
    pub computation_ms: u64,
    pub computed_at: DateTime<Utc>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Tuning parameters for the analytics session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Largest filtered node count for which centrality is computed (default: 5000)
    pub max_centrality_nodes: usize,
    /// Length of ranked lists shown to users (default: 10)
    pub top_n: usize,
    /// Filtered graphs a session keeps memoized; the oldest is evicted
    /// beyond this (default: 32)
    pub max_cached_filters: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            max_centrality_nodes: 5000,
            top_n: 10,
            max_cached_filters: 32,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
