use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Retrieval failed after exhausting retries, returned a non-success
    /// status, or produced an empty body
    #[error("Upstream unavailable: {url}: {reason}")]
    UpstreamUnavailable { url: String, reason: String },

    /// Expected column, row shape, series or date absent from the input
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
