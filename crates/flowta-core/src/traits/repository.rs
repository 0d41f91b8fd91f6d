//! Repository trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flowta_helper::Sequence;

use crate::error::DataError;
use crate::types::Snapshot;

/// Trait for asset history stores.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Names of all assets in the repository, sorted.
    async fn assets(&self) -> Result<Vec<String>, DataError>;

    /// Full history of an asset, ordered from oldest to newest.
    async fn get(&self, name: &str) -> Result<Vec<Snapshot>, DataError>;

    /// History of an asset from `since` onward.
    async fn get_since(
        &self,
        name: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Snapshot>, DataError> {
        let since = since.timestamp_millis();
        let snapshots = self.get(name).await?;
        Ok(snapshots
            .into_iter()
            .filter(|s| s.timestamp >= since)
            .collect())
    }

    /// Date of the newest snapshot of an asset.
    async fn last_date(&self, name: &str) -> Result<DateTime<Utc>, DataError> {
        let snapshots = self.get(name).await?;
        snapshots
            .last()
            .map(Snapshot::datetime)
            .ok_or(DataError::NoDataAvailable)
    }

    /// Append snapshots to an asset, creating it when missing.
    ///
    /// Returns the number of snapshots written.
    async fn append(&self, name: &str, snapshots: Sequence<Snapshot>) -> Result<usize, DataError>;

    /// Get the repository name.
    fn name(&self) -> &str;
}
