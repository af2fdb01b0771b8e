//! Default values for configuration

/// Default base URL of the Cloud Natural Language API
pub fn default_api_endpoint() -> String {
    std::env::var("TUBESENT_API_ENDPOINT")
        .unwrap_or_else(|_| "https://language.googleapis.com/".to_string())
}

/// Default environment variable name for the API key
pub fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

/// Default request timeout in seconds
pub fn default_api_timeout() -> u64 {
    30
}

/// Default pause before retrying a rate-limited request (seconds)
pub fn default_backoff_secs() -> u64 {
    120
}

/// Default ledger path
pub fn default_output() -> String {
    "sentiments.csv".to_string()
}
