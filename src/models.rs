//! Shared domain types for the sentiment collection pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single video from the input table. Read-only: the collector never
/// mutates records, it only scores their titles.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRecord {
    /// Unique YouTube identifier (e.g. "dQw4w9WgXcQ")
    pub youtube_id: String,

    /// The text sent to the scoring service
    pub title: String,

    /// Columns from the input table we carry through untouched
    /// (channel, published_at, view counts, ...)
    pub extra: HashMap<String, String>,
}

impl VideoRecord {
    pub fn new(youtube_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            youtube_id: youtube_id.into(),
            title: title.into(),
            extra: HashMap::new(),
        }
    }
}

/// The sentiment scored for one video. Created once per successfully
/// scored record and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub youtube_id: String,

    /// The full response document as returned by the service, kept
    /// verbatim for auditability.
    pub raw: serde_json::Value,

    /// Document-level sentiment score in [-1.0, 1.0]
    pub score: f64,

    /// Document-level sentiment magnitude, >= 0.0
    pub magnitude: f64,
}

/// Diagnostic for a video the scoring service refused to score.
/// The record is skipped; no ledger row is written for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    pub youtube_id: String,
    pub code: u16,
    pub message: String,
}
