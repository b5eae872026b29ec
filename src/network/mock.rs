//! Mock snapshot source for testing consumers.
//!
//! Returns a pre-configured snapshot (or error) without touching disk or
//! the network.

use anyhow::Result;
use async_trait::async_trait;

use super::models::NetworkSnapshot;
use super::source::SnapshotSource;

/// In-memory implementation of `SnapshotSource` for tests.
///
/// Returns an empty snapshot unless configured otherwise.
pub struct MockSnapshotSource {
    snapshot: NetworkSnapshot,
    failure: Option<String>,
}

impl MockSnapshotSource {
    /// A source that returns an empty snapshot.
    pub fn new() -> Self {
        Self {
            snapshot: NetworkSnapshot::default(),
            failure: None,
        }
    }

    pub fn with_snapshot(snapshot: NetworkSnapshot) -> Self {
        Self {
            snapshot,
            failure: None,
        }
    }

    /// A source whose every fetch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            snapshot: NetworkSnapshot::default(),
            failure: Some(message.into()),
        }
    }
}

impl Default for MockSnapshotSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshotSource {
    async fn fetch(&self) -> Result<NetworkSnapshot> {
        match &self.failure {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(self.snapshot.clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_empty_by_default() {
        let snapshot = MockSnapshotSource::new().fetch().await.unwrap();
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.edges.is_empty());
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let err = MockSnapshotSource::failing("boom").fetch().await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
