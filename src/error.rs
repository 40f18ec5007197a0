//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`PipelineError`] as the error type.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The unified error type for all crate errors.
///
/// # Example
///
/// ```rust
/// use candle_sentiment::error::PipelineError;
///
/// fn handle_error(e: PipelineError) {
///     match &e {
///         PipelineError::ModelLoad(_) | PipelineError::Schema(_) => {
///             // Artifact unusable - the pipeline falls back to the lexicon
///         }
///         PipelineError::Config(_) => {
///             // Bad thresholds or options - fix configuration
///         }
///         _ => eprintln!("error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Model artifact missing or unreadable.
    #[error("{0}")]
    ModelLoad(String),

    /// Model artifact parsed but does not match the expected schema.
    #[error("{0}")]
    Schema(String),

    /// Invalid configuration. Rejected before any text is scored.
    #[error("{0}")]
    Config(String),

    /// Requested compute device is unavailable.
    #[error("{0}")]
    Device(String),

    /// Training data could not be read or is empty.
    #[error("{0}")]
    Dataset(String),

    /// Model fitting failed.
    #[error("{0}")]
    Training(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Schema(format!("Malformed model artifact: {value}"))
    }
}

impl From<toml::de::Error> for PipelineError {
    fn from(value: toml::de::Error) -> Self {
        PipelineError::Config(format!("Malformed configuration: {value}"))
    }
}
