use domain::telemetry::CollectionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an analysis could not produce a result
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum AnalysisError {
    #[error("Data collection failed: {0}")]
    Collection(#[from] CollectionError),

    #[error("Analysis was cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

