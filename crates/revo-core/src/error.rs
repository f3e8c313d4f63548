//! Unified error types for revo

use thiserror::Error;

/// Unified error type for all revo operations
#[derive(Error, Debug)]
pub enum RevoError {
    // Pre-flight errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Provider errors (every one of these is retried by the completion client)
    #[error("Provider error: {0}")]
    Provider(String),

    // Pipeline errors
    #[error("Review failed during {phase}: {source}")]
    Pipeline {
        phase: String,
        #[source]
        source: Box<RevoError>,
    },

    // Input errors
    #[error("Git command failed: {0}")]
    Git(String),

    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

impl RevoError {
    /// Wrap an unrecovered error as a pipeline failure for the given phase
    pub fn pipeline(phase: impl Into<String>, source: RevoError) -> Self {
        RevoError::Pipeline {
            phase: phase.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error is fatal before any review work begins
    pub fn is_configuration(&self) -> bool {
        matches!(self, RevoError::Config(_))
    }
}

/// Result type alias using RevoError
pub type Result<T> = std::result::Result<T, RevoError>;
