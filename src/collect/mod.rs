//! The sentiment collection loop
//!
//! Drives a bounded, strictly sequential run of scoring requests and
//! guarantees each success is durably in the ledger before the next
//! record is touched. Three failure categories get three policies:
//!
//! - rate limited: pause for a fixed interval, retry the same record,
//!   as many times as it takes
//! - rejected content: log a diagnostic, skip the record
//! - anything else: abort the run; rows already written stay valid

use crate::error::{Error, Result};
use crate::language::AnalyzeSentiment;
use crate::ledger::Ledger;
use crate::models::{Rejection, SentimentResult, VideoRecord};
use crate::progress::collect_bar;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Fixed pause before retrying a rate-limited request
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(120);

/// Statistics from a collection run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectStats {
    /// Rows appended to the ledger this run
    pub rows_written: usize,

    /// Videos the service refused to score (no row written)
    pub rejections: Vec<Rejection>,
}

/// Sequential sentiment collector over an injected scoring service
pub struct SentimentCollector<S> {
    service: S,
    backoff: Duration,
}

impl<S: AnalyzeSentiment> SentimentCollector<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Override the rate-limit pause (the interval stays fixed; retries
    /// stay unbounded)
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Score every record in input order, appending one ledger row per
    /// success. Returns how many rows were written and which records the
    /// service rejected. Duplicate input records produce duplicate rows;
    /// nothing here deduplicates against prior runs.
    pub async fn collect<L: Ledger>(
        &self,
        records: &[VideoRecord],
        sink: &mut L,
    ) -> Result<CollectStats> {
        let total = records.len();
        info!("Start processing {} videos...", total);

        let bar = collect_bar(total as u64);
        let mut stats = CollectStats::default();

        for (processed, video) in records.iter().enumerate() {
            loop {
                match self.service.analyze_sentiment(&video.title).await {
                    Ok(scored) => {
                        let result = SentimentResult {
                            youtube_id: video.youtube_id.clone(),
                            score: scored.score,
                            magnitude: scored.magnitude,
                            raw: scored.raw,
                        };
                        // Durable before we advance
                        sink.append(&result)?;
                        stats.rows_written += 1;
                        break;
                    }
                    Err(Error::RateLimited) => {
                        info!(
                            "Processed {}/{} videos so far; rate limited, retrying in {}s",
                            processed,
                            total,
                            self.backoff.as_secs()
                        );
                        bar.set_message("rate limited");
                        tokio::time::sleep(self.backoff).await;
                        bar.set_message("");
                        // Same record, same request
                    }
                    Err(Error::RejectedContent { code, message }) => {
                        warn!("Error [{}] for video {}: {}", code, video.youtube_id, message);
                        stats.rejections.push(Rejection {
                            youtube_id: video.youtube_id.clone(),
                            code,
                            message,
                        });
                        break;
                    }
                    Err(e) => {
                        bar.abandon();
                        return Err(Error::Aborted {
                            youtube_id: video.youtube_id.clone(),
                            source: Box::new(e),
                        });
                    }
                }
            }
            bar.inc(1);
        }

        bar.finish_and_clear();
        info!(
            "Finished processing {} videos ({} rows written, {} rejected)",
            total,
            stats.rows_written,
            stats.rejections.len()
        );
        Ok(stats)
    }
}
