//! tubesent - collect sentiment scores for YouTube video titles
//!
//! The core of this crate is the [`collect::SentimentCollector`]: a strictly
//! sequential loop that scores each video title against the Google Cloud
//! Natural Language API and appends one row per success to an append-only
//! CSV ledger. Rate limits pause and retry the same record; per-item
//! rejections are logged and skipped; anything else aborts the run with the
//! rows written so far left intact.

pub mod collect;
pub mod commands;
pub mod config;
pub mod error;
pub mod language;
pub mod ledger;
pub mod models;
pub mod progress;
pub mod videos;

pub use collect::{CollectStats, SentimentCollector};
pub use config::Config;
pub use error::{Error, Result};
pub use language::{AnalyzeSentiment, LanguageClient};
pub use ledger::{CsvLedger, Ledger};
pub use models::{Rejection, SentimentResult, VideoRecord};
