//! Relgraph
//!
//! Relationship network analytics for case investigations:
//! - Typed relationship graph built from a `{nodes, edges}` snapshot
//! - Filtering by interaction weight, interaction type and node kind
//! - Shortest paths, label propagation communities, degree / betweenness centrality
//! - Snapshot loading from JSON exports or the network data service

pub mod network;

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use network::{AnalyticsConfig, FileSnapshotSource, HttpSnapshotSource, SnapshotSource};

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub source: SourceYamlConfig,
    pub analytics: AnalyticsConfig,
}

/// Snapshot source section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceYamlConfig {
    /// Base URL of the network data service
    pub url: Option<String>,
    /// Path to a snapshot JSON export (takes precedence over `url`)
    pub path: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SourceYamlConfig {
    fn default() -> Self {
        Self {
            url: None,
            path: None,
            timeout_secs: 30,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub source_url: Option<String>,
    pub source_path: Option<String>,
    pub source_timeout_secs: u64,
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Load configuration from environment variables only.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "relgraph.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            source_url: std::env::var("RELGRAPH_SOURCE_URL")
                .ok()
                .or(yaml.source.url),
            source_path: std::env::var("RELGRAPH_SOURCE_PATH")
                .ok()
                .or(yaml.source.path),
            source_timeout_secs: env_parse("RELGRAPH_SOURCE_TIMEOUT_SECS")
                .unwrap_or(yaml.source.timeout_secs),
            analytics: AnalyticsConfig {
                max_centrality_nodes: env_parse("RELGRAPH_MAX_CENTRALITY_NODES")
                    .unwrap_or(yaml.analytics.max_centrality_nodes),
                top_n: env_parse("RELGRAPH_TOP_N").unwrap_or(yaml.analytics.top_n),
                max_cached_filters: env_parse("RELGRAPH_MAX_CACHED_FILTERS")
                    .unwrap_or(yaml.analytics.max_cached_filters),
            },
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("relgraph.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }

    /// Build the configured snapshot source. A local path wins over a URL.
    pub fn snapshot_source(&self) -> Result<Box<dyn SnapshotSource>> {
        if let Some(path) = &self.source_path {
            return Ok(Box::new(FileSnapshotSource::new(path)));
        }
        if let Some(url) = &self.source_url {
            let timeout = Duration::from_secs(self.source_timeout_secs);
            return Ok(Box::new(HttpSnapshotSource::for_server(url, timeout)?));
        }
        anyhow::bail!(
            "No snapshot source configured (set source.path / source.url, \
             RELGRAPH_SOURCE_PATH / RELGRAPH_SOURCE_URL, or pass --snapshot / --url)"
        )
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|s| s.parse().ok())
}

// ============================================================================
// Tests
// ============================================================================
