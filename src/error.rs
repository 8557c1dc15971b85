//! Error types for the projection pipeline

use thiserror::Error;

/// Errors raised while loading inputs or writing outputs
///
/// Core arithmetic never fails: missing data propagates as missing cells,
/// not as errors. Anything in this enum aborts the run (fail-fast, no
/// partial output).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing column '{column}' in {file}")]
    MissingColumn { column: String, file: String },

    #[error("invalid value '{value}' for column '{column}'")]
    InvalidValue { column: String, value: String },

    #[error("no rows loaded from {0}")]
    EmptyInput(String),
}
