//! Collect command implementation

use crate::collect::SentimentCollector;
use crate::config::Config;
use crate::error::Result;
use crate::language::LanguageClient;
use crate::ledger::CsvLedger;
use crate::models::Rejection;
use crate::videos::load_videos;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Options for a collection run
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Input CSV of videos (youtube_id, title, ...)
    pub videos: PathBuf,

    /// Ledger path; defaults to `collect.output` from the config
    pub output: Option<PathBuf>,

    /// Only process the first N videos
    pub limit: Option<usize>,
}

/// Report from a collection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectReport {
    pub output: String,
    pub videos_read: usize,
    pub rows_written: usize,
    pub rejections: Vec<Rejection>,
}

/// Load the input videos, run the collector against the configured
/// scoring service, and append results to the ledger
pub async fn cmd_collect(config: &Config, options: CollectOptions) -> Result<CollectReport> {
    let mut records = load_videos(&options.videos)?;
    if let Some(limit) = options.limit {
        records.truncate(limit);
        info!("Limiting run to the first {} videos", records.len());
    }

    let output = options
        .output
        .unwrap_or_else(|| PathBuf::from(&config.collect.output));

    let api_key = config.api_key()?;
    let client = LanguageClient::new(
        &config.api.endpoint,
        api_key,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    let collector = SentimentCollector::new(client)
        .with_backoff(Duration::from_secs(config.collect.backoff_secs));

    let mut ledger = CsvLedger::open(&output)?;
    let stats = collector.collect(&records, &mut ledger).await?;

    Ok(CollectReport {
        output: output.display().to_string(),
        videos_read: records.len(),
        rows_written: stats.rows_written,
        rejections: stats.rejections,
    })
}

/// Print a collection report to console
pub fn print_collect_report(report: &CollectReport) {
    println!("\n✓ Collection complete");
    println!("  Ledger: {}", report.output);
    println!("  Videos processed: {}", report.videos_read);
    println!("  Rows written: {}", report.rows_written);
    println!("  Rejected: {}", report.rejections.len());
    for rejection in &report.rejections {
        println!(
            "    {} [{}]: {}",
            rejection.youtube_id, rejection.code, rejection.message
        );
    }
}
