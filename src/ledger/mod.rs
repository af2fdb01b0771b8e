//! Append-only CSV ledger of sentiment results
//!
//! One row per successfully scored video, written and flushed before the
//! collector moves on, so a crash or abort never loses a scored record.
//! Existing files are appended to; prior rows are never rewritten and the
//! header is only emitted for a fresh file.

use crate::error::Result;
use crate::models::SentimentResult;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column order of the ledger file
pub const LEDGER_HEADER: [&str; 4] = [
    "youtube_id",
    "sentiment",
    "sentiment_score",
    "sentiment_magnitude",
];

/// Sink the collector appends results to, one durable row at a time
pub trait Ledger {
    fn append(&mut self, result: &SentimentResult) -> Result<()>;
}

/// CSV-file-backed ledger
pub struct CsvLedger {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvLedger {
    /// Open a ledger at `path`, creating it with a header row when the
    /// file is new (or exists but is empty). An existing non-empty file
    /// is opened for append and its header is not re-written.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let has_rows = std::fs::metadata(&path)
            .map(|meta| meta.len() > 0)
            .unwrap_or(false);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if has_rows {
            debug!("Appending to existing ledger at {:?}", path);
        } else {
            writer.write_record(LEDGER_HEADER)?;
            writer.flush()?;
            debug!("Created new ledger at {:?}", path);
        }

        Ok(Self { writer, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Ledger for CsvLedger {
    fn append(&mut self, result: &SentimentResult) -> Result<()> {
        let raw = serde_json::to_string(&result.raw)?;
        let score = result.score.to_string();
        let magnitude = result.magnitude.to_string();
        self.writer.write_record([
            result.youtube_id.as_str(),
            raw.as_str(),
            score.as_str(),
            magnitude.as_str(),
        ])?;
        // The row must be on disk before the collector advances
        self.writer.flush()?;
        Ok(())
    }
}

/// One row read back from a ledger file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    pub youtube_id: String,
    /// Full response document as serialized JSON text
    pub sentiment: String,
    pub sentiment_score: f64,
    pub sentiment_magnitude: f64,
}

/// Read all rows from an existing ledger file
pub fn read_ledger(path: impl AsRef<Path>) -> Result<Vec<LedgerRow>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn result_for(id: &str, title: &str, score: f64, magnitude: f64) -> SentimentResult {
        SentimentResult {
            youtube_id: id.to_string(),
            raw: serde_json::json!({
                "documentSentiment": { "score": score, "magnitude": magnitude },
                "language": "en",
                "title": title,
            }),
            score,
            magnitude,
        }
    }

    #[test]
    fn test_new_ledger_writes_header_and_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sentiments.csv");

        let mut ledger = CsvLedger::open(&path).unwrap();
        ledger
            .append(&result_for("a", "first video", 0.5, 1.0))
            .unwrap();
        ledger
            .append(&result_for("b", "second video", -0.3, 0.4))
            .unwrap();
        drop(ledger);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("youtube_id,sentiment,sentiment_score,sentiment_magnitude"));

        let rows = read_ledger(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].youtube_id, "a");
        assert_eq!(rows[0].sentiment_score, 0.5);
        assert_eq!(rows[1].youtube_id, "b");
        assert_eq!(rows[1].sentiment_magnitude, 0.4);
    }

    #[test]
    fn test_reopen_appends_without_second_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sentiments.csv");

        {
            let mut ledger = CsvLedger::open(&path).unwrap();
            ledger.append(&result_for("a", "run one", 0.1, 0.2)).unwrap();
        }
        {
            let mut ledger = CsvLedger::open(&path).unwrap();
            ledger.append(&result_for("b", "run two", 0.3, 0.6)).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("youtube_id,sentiment").count(), 1);

        // Prior rows are preserved verbatim, new rows land after them
        let rows = read_ledger(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].youtube_id, "a");
        assert_eq!(rows[1].youtube_id, "b");
    }

    #[test]
    fn test_existing_empty_file_gets_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sentiments.csv");
        std::fs::write(&path, "").unwrap();

        let mut ledger = CsvLedger::open(&path).unwrap();
        ledger.append(&result_for("a", "x", 0.0, 0.0)).unwrap();
        drop(ledger);

        let rows = read_ledger(&path).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_non_ascii_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sentiments.csv");

        let mut ledger = CsvLedger::open(&path).unwrap();
        ledger
            .append(&result_for("a", "Россия 24 — новости, ありがとう", -0.8, 2.1))
            .unwrap();
        drop(ledger);

        let rows = read_ledger(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&rows[0].sentiment).unwrap();
        assert_eq!(raw["title"], "Россия 24 — новости, ありがとう");
    }
}
