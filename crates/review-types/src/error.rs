//! Error types shared across the reviewer.

use thiserror::Error;

/// Configuration and startup errors.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider credential is not set
    #[error("Missing API credential: {0}")]
    MissingCredential(String),
}
