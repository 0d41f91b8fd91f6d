//! Directory of per-asset CSV files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use flowta_core::error::DataError;
use flowta_core::traits::Repository;
use flowta_core::types::Snapshot;
use flowta_helper::{close_and_log_error, waitable, Sequence, WaitGroup};
use tracing::{debug, info};

use crate::csv_source::{load_csv, SnapshotWriter};

const EXTENSION: &str = "csv";

/// Repository storing each asset as `<root>/<asset>.csv`.
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    root: PathBuf,
}

impl FileSystemRepository {
    /// Open the repository at `root`, creating the directory when missing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, DataError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory of the repository.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn asset_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{EXTENSION}"))
    }
}

#[async_trait]
impl Repository for FileSystemRepository {
    async fn assets(&self) -> Result<Vec<String>, DataError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut assets = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                assets.push(stem.to_string());
            }
        }

        assets.sort();
        Ok(assets)
    }

    async fn get(&self, name: &str) -> Result<Vec<Snapshot>, DataError> {
        let path = self.asset_path(name);
        if !tokio::fs::try_exists(&path).await? {
            return Err(DataError::AssetNotFound(name.to_string()));
        }

        let snapshots = load_csv(&path)?;
        debug!(asset = %name, count = snapshots.len(), "Loaded snapshots");
        Ok(snapshots)
    }

    async fn append(&self, name: &str, snapshots: Sequence<Snapshot>) -> Result<usize, DataError> {
        let mut writer = SnapshotWriter::append(self.asset_path(name))?;

        let group = WaitGroup::new();
        let mut input = waitable(&group, snapshots);
        let mut written = 0;
        let mut failure = None;

        while let Some(snapshot) = input.recv().await {
            if let Err(e) = writer.write(&snapshot) {
                failure = Some(e);
                break;
            }
            written += 1;
        }

        // Dropping the input releases the relay if writing stopped early.
        drop(input);
        group.wait().await;

        if let Some(e) = failure {
            close_and_log_error(name, writer.close());
            return Err(e);
        }

        writer.close()?;
        info!(asset = %name, count = written, "Appended snapshots");
        Ok(written)
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use flowta_helper::from_vec;

    const DAY: i64 = 86_400_000;

    fn daily(start: i64, closes: &[f64]) -> Vec<Snapshot> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Snapshot::new(start + i as i64 * DAY, c, c + 1.0, c - 1.0, c, 100.0))
            .collect()
    }

    #[tokio::test]
    async fn test_append_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileSystemRepository::new(dir.path()).unwrap();

        let first = daily(1_704_067_200_000, &[10.0, 11.0]);
        let second = daily(1_704_067_200_000 + 2 * DAY, &[12.0]);

        assert_eq!(repository.append("AAA", from_vec(first)).await.unwrap(), 2);
        assert_eq!(repository.append("AAA", from_vec(second)).await.unwrap(), 1);

        let snapshots = repository.get("AAA").await.unwrap();
        let closes: Vec<f64> = snapshots.iter().map(|s| s.close).collect();
        assert_eq!(closes, vec![10.0, 11.0, 12.0]);
        assert_eq!(snapshots[2].timestamp, 1_704_067_200_000 + 2 * DAY);
    }

    #[tokio::test]
    async fn test_assets_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileSystemRepository::new(dir.path()).unwrap();

        for name in ["ZZZ", "AAA", "MMM"] {
            repository
                .append(name, from_vec(daily(0, &[1.0])))
                .await
                .unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(repository.assets().await.unwrap(), vec!["AAA", "MMM", "ZZZ"]);
    }

    #[tokio::test]
    async fn test_missing_asset() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileSystemRepository::new(dir.path()).unwrap();

        assert!(matches!(
            repository.get("NOPE").await,
            Err(DataError::AssetNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_since_and_last_date() {
        let dir = tempfile::tempdir().unwrap();
        let repository = FileSystemRepository::new(dir.path()).unwrap();
        let start = 1_704_067_200_000;

        repository
            .append("AAA", from_vec(daily(start, &[1.0, 2.0, 3.0, 4.0])))
            .await
            .unwrap();

        let since = DateTime::<Utc>::from_timestamp_millis(start + 2 * DAY).unwrap();
        let recent = repository.get_since("AAA", since).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].close, 3.0);

        let last = repository.last_date("AAA").await.unwrap();
        assert_eq!(last.timestamp_millis(), start + 3 * DAY);
    }
}
