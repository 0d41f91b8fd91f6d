//! Price and volume snapshots.

use chrono::{DateTime, Utc};
use flowta_helper::{map, Sequence};
use serde::{Deserialize, Serialize};

/// One period of market data for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Snapshot {
    /// Create a new snapshot.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the typical price (HLC average).
    #[inline]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }
}

/// Closing prices of a snapshot sequence.
pub fn closings(snapshots: Sequence<Snapshot>) -> Sequence<f64> {
    map(snapshots, |s| s.close)
}

/// Opening prices of a snapshot sequence.
pub fn openings(snapshots: Sequence<Snapshot>) -> Sequence<f64> {
    map(snapshots, |s| s.open)
}

/// High prices of a snapshot sequence.
pub fn highs(snapshots: Sequence<Snapshot>) -> Sequence<f64> {
    map(snapshots, |s| s.high)
}

/// Low prices of a snapshot sequence.
pub fn lows(snapshots: Sequence<Snapshot>) -> Sequence<f64> {
    map(snapshots, |s| s.low)
}

/// Volumes of a snapshot sequence.
pub fn volumes(snapshots: Sequence<Snapshot>) -> Sequence<f64> {
    map(snapshots, |s| s.volume)
}

/// Typical prices of a snapshot sequence.
pub fn typical_prices(snapshots: Sequence<Snapshot>) -> Sequence<f64> {
    map(snapshots, |s| s.typical_price())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowta_helper::{from_vec, to_vec};

    #[test]
    fn test_snapshot_calculations() {
        let snapshot = Snapshot::new(1000, 100.0, 110.0, 95.0, 105.0, 1000000.0);

        assert!((snapshot.typical_price() - 103.333333).abs() < 0.001);
        assert_eq!(snapshot.datetime().timestamp_millis(), 1000);
    }

    #[tokio::test]
    async fn test_projections() {
        let snapshots = vec![
            Snapshot::new(1, 100.0, 101.0, 99.0, 100.5, 1000.0),
            Snapshot::new(2, 100.5, 102.0, 100.0, 101.5, 2000.0),
        ];

        let closes = to_vec(closings(from_vec(snapshots.clone()))).await;
        assert_eq!(closes, vec![100.5, 101.5]);

        let vols = to_vec(volumes(from_vec(snapshots.clone()))).await;
        assert_eq!(vols, vec![1000.0, 2000.0]);

        let high_prices = to_vec(highs(from_vec(snapshots))).await;
        assert_eq!(high_prices, vec![101.0, 102.0]);
    }
}
