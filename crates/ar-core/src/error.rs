//! Core error type.
//!
//! Data-shape problems (NaN coordinates, malformed POIs, empty results) are
//! never errors in this workspace: they degrade to sentinels or empty
//! vectors.  `CoreError` covers the one genuinely fallible operation in the
//! core: validating a configuration.  Unknown category keys are not errors;
//! they map to `Category::Unknown`.

use thiserror::Error;

/// The top-level error type for `ar-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ar-core`.
pub type CoreResult<T> = Result<T, CoreError>;
