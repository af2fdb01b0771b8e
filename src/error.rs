//! Custom error types for tubesent

use thiserror::Error;

/// Main error type for tubesent operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The scoring service asked us to slow down (HTTP 429).
    /// Handled inside the collector; never crosses `collect`.
    #[error("Rate limited by the scoring service")]
    RateLimited,

    /// The scoring service rejected the request itself (HTTP 400),
    /// typically because the text is empty or unscoreable.
    /// Handled inside the collector; never crosses `collect`.
    #[error("Request rejected [{code}]: {message}")]
    RejectedContent { code: u16, message: String },

    /// Any other non-success status from the scoring service. Fatal:
    /// aborts the whole run.
    #[error("Scoring service returned HTTP {status}: {message}")]
    ServiceStatus { status: u16, message: String },

    #[error("Scoring run aborted at video {youtube_id}: {source}")]
    Aborted {
        youtube_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl Error {
    /// Whether this error stops the whole collection run when returned
    /// by the scoring service. Rate limits and per-item rejections are
    /// recoverable; everything else is not.
    pub fn is_fatal_for_collection(&self) -> bool {
        !matches!(self, Error::RateLimited | Error::RejectedContent { .. })
    }
}

/// Result type alias for tubesent
pub type Result<T> = std::result::Result<T, Error>;
