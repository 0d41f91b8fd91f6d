//! CSV snapshot files.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use csv::{ReaderBuilder, Writer, WriterBuilder};
use flowta_core::error::DataError;
use flowta_core::types::Snapshot;
use serde::{Deserialize, Serialize};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Row written by [`SnapshotWriter`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<&Snapshot> for CsvRow {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            date: format_timestamp(snapshot.timestamp),
            open: snapshot.open,
            high: snapshot.high,
            low: snapshot.low,
            close: snapshot.close,
            volume: snapshot.volume,
        }
    }
}

/// Load snapshots from a CSV file, sorted by timestamp.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Snapshot>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut snapshots = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

        let timestamp = parse_timestamp(&record.date)?;

        snapshots.push(Snapshot::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        ));
    }

    // Sort by timestamp
    snapshots.sort_by_key(|s| s.timestamp);

    Ok(snapshots)
}

/// Appends snapshots to a CSV file.
pub struct SnapshotWriter {
    writer: Writer<File>,
}

impl SnapshotWriter {
    /// Open `path` for appending, creating it when missing. The header row is
    /// written only when the file is new or empty.
    pub fn append(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let needs_header = file.metadata()?.len() == 0;

        let writer = WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        Ok(Self { writer })
    }

    /// Write one snapshot.
    pub fn write(&mut self, snapshot: &Snapshot) -> Result<(), DataError> {
        self.writer
            .serialize(CsvRow::from(snapshot))
            .map_err(io::Error::from)?;
        Ok(())
    }

    /// Flush buffered rows to disk.
    pub fn close(mut self) -> Result<(), DataError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Parse various timestamp formats into unix milliseconds.
pub fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        let midnight = NaiveDate::parse_from_str(date_str, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0));
        if let Some(dt) = midnight {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

/// Dates at midnight are written without a time of day.
fn format_timestamp(timestamp: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(timestamp).unwrap_or(DateTime::UNIX_EPOCH);
    if dt.num_seconds_from_midnight() == 0 && dt.timestamp_subsec_millis() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_timestamp() {
        // Test various formats
        assert_eq!(parse_timestamp("2024-01-15").unwrap(), 1_705_276_800_000);
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_ok());
        assert!(parse_timestamp("01/15/2024").is_ok());
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000); // Unix ms
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000); // Unix sec
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1_705_276_800_000), "2024-01-15");
        assert_eq!(format_timestamp(1_705_314_600_000), "2024-01-15 10:30:00");
    }

    #[test]
    fn test_load_csv_sorts_by_date() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Open,High,Low,Close,Adj Close,Volume").unwrap();
        writeln!(file, "2024-01-16,2,3,1,2.5,2.5,200").unwrap();
        writeln!(file, "2024-01-15,1,2,0.5,1.5,1.5,100").unwrap();

        let snapshots = load_csv(file.path()).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].close, 1.5);
        assert_eq!(snapshots[0].volume, 100.0);
        assert_eq!(snapshots[1].open, 2.0);
    }

    #[test]
    fn test_load_csv_rejects_bad_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Open,High,Low,Close,Volume").unwrap();
        writeln!(file, "2024-01-15,x,2,0.5,1.5,100").unwrap();

        assert!(matches!(load_csv(file.path()), Err(DataError::ParseError(_))));
    }

    #[test]
    fn test_writer_appends_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset.csv");

        let mut writer = SnapshotWriter::append(&path).unwrap();
        writer
            .write(&Snapshot::new(1_705_276_800_000, 1.0, 2.0, 0.5, 1.5, 10.0))
            .unwrap();
        writer.close().unwrap();

        let mut writer = SnapshotWriter::append(&path).unwrap();
        writer
            .write(&Snapshot::new(1_705_363_200_000, 2.0, 3.0, 1.5, 2.5, 20.0))
            .unwrap();
        writer.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Date").count(), 1);

        let snapshots = load_csv(&path).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].close, 2.5);
    }
}
