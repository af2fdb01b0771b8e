//! Status command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ledger::read_ledger;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of an existing ledger file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub path: String,
    pub rows: usize,
    pub mean_score: Option<f64>,
    pub mean_magnitude: Option<f64>,
    /// youtube_id of the highest-scoring row
    pub most_positive: Option<String>,
    /// youtube_id of the lowest-scoring row
    pub most_negative: Option<String>,
}

/// Summarize the ledger at `output` (or the configured default)
pub fn cmd_status(config: &Config, output: Option<PathBuf>) -> Result<LedgerSummary> {
    let path = output.unwrap_or_else(|| PathBuf::from(&config.collect.output));
    if !path.exists() {
        return Err(Error::Ledger(format!(
            "No ledger found at {}",
            path.display()
        )));
    }

    let rows = read_ledger(&path)?;
    if rows.is_empty() {
        return Ok(LedgerSummary {
            path: path.display().to_string(),
            rows: 0,
            mean_score: None,
            mean_magnitude: None,
            most_positive: None,
            most_negative: None,
        });
    }

    let count = rows.len() as f64;
    let mean_score = rows.iter().map(|r| r.sentiment_score).sum::<f64>() / count;
    let mean_magnitude = rows.iter().map(|r| r.sentiment_magnitude).sum::<f64>() / count;

    let most_positive = rows
        .iter()
        .max_by(|a, b| a.sentiment_score.total_cmp(&b.sentiment_score))
        .map(|r| r.youtube_id.clone());
    let most_negative = rows
        .iter()
        .min_by(|a, b| a.sentiment_score.total_cmp(&b.sentiment_score))
        .map(|r| r.youtube_id.clone());

    Ok(LedgerSummary {
        path: path.display().to_string(),
        rows: rows.len(),
        mean_score: Some(mean_score),
        mean_magnitude: Some(mean_magnitude),
        most_positive,
        most_negative,
    })
}

/// Print a ledger summary to console
pub fn print_status(summary: &LedgerSummary) {
    println!("\n📊 tubesent Ledger\n");
    println!("Ledger: {}", summary.path);
    println!("Rows: {}", summary.rows);

    if summary.rows == 0 {
        println!("Ledger is empty. Run 'tubesent collect' to score videos.");
        return;
    }

    if let Some(mean_score) = summary.mean_score {
        println!("Mean score: {:.3}", mean_score);
    }
    if let Some(mean_magnitude) = summary.mean_magnitude {
        println!("Mean magnitude: {:.3}", mean_magnitude);
    }
    if let Some(ref id) = summary.most_positive {
        println!("Most positive: {}", id);
    }
    if let Some(ref id) = summary.most_negative {
        println!("Most negative: {}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CsvLedger, Ledger};
    use crate::models::SentimentResult;
    use tempfile::TempDir;

    fn result_for(id: &str, score: f64, magnitude: f64) -> SentimentResult {
        SentimentResult {
            youtube_id: id.to_string(),
            raw: serde_json::json!({
                "documentSentiment": { "score": score, "magnitude": magnitude }
            }),
            score,
            magnitude,
        }
    }

    #[test]
    fn test_status_summarizes_ledger() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sentiments.csv");

        let mut ledger = CsvLedger::open(&path).unwrap();
        ledger.append(&result_for("up", 0.8, 1.0)).unwrap();
        ledger.append(&result_for("down", -0.6, 0.9)).unwrap();
        ledger.append(&result_for("flat", 0.1, 0.2)).unwrap();
        drop(ledger);

        let summary = cmd_status(&Config::default(), Some(path)).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.most_positive.as_deref(), Some("up"));
        assert_eq!(summary.most_negative.as_deref(), Some("down"));
        assert!((summary.mean_score.unwrap() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_status_missing_ledger() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.csv");
        let err = cmd_status(&Config::default(), Some(path)).unwrap_err();
        assert!(matches!(err, Error::Ledger(_)));
    }

    #[test]
    fn test_status_empty_ledger() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sentiments.csv");
        drop(CsvLedger::open(&path).unwrap());

        let summary = cmd_status(&Config::default(), Some(path)).unwrap();
        assert_eq!(summary.rows, 0);
        assert!(summary.mean_score.is_none());
    }
}
