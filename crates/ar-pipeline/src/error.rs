//! Error types for ar-pipeline.

use ar_core::CoreError;
use ar_feed::FeedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("view configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("POI feed error: {0}")]
    Feed(#[from] FeedError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
