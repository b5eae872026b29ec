//! Snapshot sources.
//!
//! The network data service is an external collaborator: it returns the full
//! `{nodes, edges}` document for a case. [`SnapshotSource`] is the seam the
//! engine consumes it through:
//!
//! - [`FileSnapshotSource`]: a JSON export on disk
//! - [`HttpSnapshotSource`]: the service's `GET /api/network` endpoint
//!
//! [`load_session`] fetches a snapshot, validates it and opens an
//! [`AnalysisSession`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use super::models::{AnalyticsConfig, NetworkSnapshot};
use super::session::AnalysisSession;

/// Path of the network endpoint on the data service.
pub const NETWORK_ENDPOINT: &str = "/api/network";

/// Supplies raw network snapshots.
///
/// Consumers use `Box<dyn SnapshotSource>` so the origin can be swapped
/// (file export, live service, in-memory mock).
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current snapshot.
    async fn fetch(&self) -> Result<NetworkSnapshot>;

    /// Human-readable origin, used in logs and error context.
    fn describe(&self) -> String;
}

// ============================================================================
// File source
// ============================================================================

/// Reads a snapshot JSON document from disk.
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<NetworkSnapshot> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// HTTP source
// ============================================================================

/// Fetches the snapshot from the network data service.
///
/// Cheaply cloneable (shares the reqwest client internally).
#[derive(Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSnapshotSource {
    /// Create a source for a full endpoint URL.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a source for the network endpoint of a service base URL
    /// (e.g. `http://localhost:8000` → `http://localhost:8000/api/network`).
    pub fn for_server(base_url: &str, timeout: Duration) -> Result<Self> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), NETWORK_ENDPOINT);
        Self::new(url, timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> Result<NetworkSnapshot> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to reach network service at {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Network service returned {}: {}", status, body);
        }

        response
            .json::<NetworkSnapshot>()
            .await
            .with_context(|| format!("Failed to decode snapshot from {}", self.url))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// ============================================================================
// Session loading
// ============================================================================

/// Fetch a snapshot, validate it and open a session.
pub async fn load_session(
    source: &dyn SnapshotSource,
    config: AnalyticsConfig,
) -> Result<AnalysisSession> {
    let snapshot = source.fetch().await?;
    tracing::info!(
        "Loaded snapshot from {}: {} nodes, {} edges",
        source.describe(),
        snapshot.nodes.len(),
        snapshot.edges.len()
    );
    AnalysisSession::from_snapshot(snapshot, config)
        .with_context(|| format!("Invalid snapshot from {}", source.describe()))
}

// ============================================================================
// Tests
// ============================================================================
