//! Error types for ar-feed.

use thiserror::Error;

/// Whole-document failures.  Per-record problems are reported through
/// [`FeedReport`](crate::FeedReport) instead.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("feed format error: {0}")]
    Format(String),
}

/// Alias for `Result<T, FeedError>`.
pub type FeedResult<T> = Result<T, FeedError>;
