//! # review-embeddings
//!
//! Embedding providers for the empathetic code reviewer.
//!
//! Turns text into fixed-length vectors for similarity search over the
//! best-practice knowledge base.
//!
//! ## Providers
//! - `GeminiEmbedder`: hosted embeddings via the Gemini `embedContent` API
//! - `HashEmbedder`: deterministic offline embeddings (feature hashing)
//!
//! Provider failures are never fatal to retrieval: `embed_or_zero` substitutes
//! the zero vector, which scores zero against everything.

pub mod error;
pub mod gemini;
pub mod hashing;
pub mod model;

pub use error::EmbeddingError;
pub use gemini::{GeminiEmbedder, GeminiEmbedderConfig, GEMINI_BASE_URL};
pub use hashing::HashEmbedder;
pub use model::{embed_or_zero, Embedding, EmbeddingModel, ModelInfo};
