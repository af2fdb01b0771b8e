//! Loading video records from the input CSV
//!
//! The input table needs at least `youtube_id` and `title` columns; any
//! other columns ride along untouched. The whole file is materialized
//! before a collection run starts, so the row count is known up front.

use crate::error::{Error, Result};
use crate::models::VideoRecord;
use std::path::Path;
use tracing::debug;

/// Load all video records from a CSV file
pub fn load_videos(path: impl AsRef<Path>) -> Result<Vec<VideoRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        Error::Input(format!("Could not open {}: {}", path.display(), e))
    })?;

    let headers = reader.headers()?.clone();
    let id_idx = headers
        .iter()
        .position(|h| h == "youtube_id")
        .ok_or_else(|| Error::Input(format!("{} has no youtube_id column", path.display())))?;
    let title_idx = headers
        .iter()
        .position(|h| h == "title")
        .ok_or_else(|| Error::Input(format!("{} has no title column", path.display())))?;

    let mut videos = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut video = VideoRecord::new(
            record.get(id_idx).unwrap_or(""),
            record.get(title_idx).unwrap_or(""),
        );
        for (i, field) in record.iter().enumerate() {
            if i == id_idx || i == title_idx {
                continue;
            }
            if let Some(name) = headers.get(i) {
                video.extra.insert(name.to_string(), field.to_string());
            }
        }
        videos.push(video);
    }

    debug!("Loaded {} videos from {}", videos.len(), path.display());
    Ok(videos)
}
