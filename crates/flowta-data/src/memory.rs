//! In-memory repository.

use std::collections::HashMap;

use async_trait::async_trait;
use flowta_core::error::DataError;
use flowta_core::traits::Repository;
use flowta_core::types::Snapshot;
use flowta_helper::{to_vec, Sequence};
use tokio::sync::RwLock;

/// Repository keeping every asset history in memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    assets: RwLock<HashMap<String, Vec<Snapshot>>>,
}

impl InMemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given histories.
    pub fn with_assets(assets: HashMap<String, Vec<Snapshot>>) -> Self {
        Self {
            assets: RwLock::new(assets),
        }
    }

    /// Store an asset history, replacing any existing one.
    pub async fn put(&self, name: &str, snapshots: Vec<Snapshot>) {
        self.assets.write().await.insert(name.to_string(), snapshots);
    }

    /// Remove an asset.
    pub async fn clear(&self, name: &str) {
        self.assets.write().await.remove(name);
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn assets(&self) -> Result<Vec<String>, DataError> {
        let mut names: Vec<String> = self.assets.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn get(&self, name: &str) -> Result<Vec<Snapshot>, DataError> {
        self.assets
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| DataError::AssetNotFound(name.to_string()))
    }

    async fn append(&self, name: &str, snapshots: Sequence<Snapshot>) -> Result<usize, DataError> {
        // Collect before locking so a slow producer never holds the lock.
        let snapshots = to_vec(snapshots).await;
        let count = snapshots.len();

        self.assets
            .write()
            .await
            .entry(name.to_string())
            .or_default()
            .extend(snapshots);

        Ok(count)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
