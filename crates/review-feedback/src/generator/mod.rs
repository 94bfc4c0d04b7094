//! Text generation trait and implementations.
//!
//! The generation provider is opaque: it takes a prompt and returns text.
//! Callers decide what to do with failures; nothing here retries.

mod api;
mod mock;

pub use api::{ApiGenerator, ApiGeneratorConfig};
pub use mock::MockGenerator;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for generation calls.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Timeout waiting for response")]
    Timeout,

    #[error("Provider returned no text")]
    EmptyResponse,
}

/// Shape of the text the caller expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// A JSON object (providers that support it are asked for JSON mode)
    Json,
    /// Free-form prose
    Text,
}

/// Pluggable text generation provider.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str, format: ResponseFormat)
        -> Result<String, GenerationError>;
}
