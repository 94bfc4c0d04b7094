//! Embedding error types.

use thiserror::Error;

/// Errors that can occur during embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Transport-level failure talking to the provider
    #[error("Embedding request failed: {0}")]
    Request(String),

    /// Provider answered with a non-success status
    #[error("Embedding API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Provider is throttling us
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Response body did not have the expected shape
    #[error("Failed to parse embedding response: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
