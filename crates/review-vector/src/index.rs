//! Vector index trait and types.
//!
//! Defines the interface for vector similarity search.

use crate::error::VectorError;
use review_embeddings::Embedding;

/// Result of a vector search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Insertion position of the matched vector
    pub position: usize,
    /// Inner-product similarity (higher = more similar)
    pub score: f32,
}

impl SearchResult {
    pub fn new(position: usize, score: f32) -> Self {
        Self { position, score }
    }
}

/// Index statistics
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of vectors in the index
    pub vector_count: usize,
    /// Embedding dimension
    pub dimension: usize,
    /// Number of stored zero vectors (entries whose embedding failed)
    pub zero_vectors: usize,
}

/// Trait for vector indexes.
///
/// Vectors are append-only and addressed by insertion position, so a caller
/// can keep a parallel sequence of payloads aligned with the index.
/// Implementations must be thread-safe for concurrent read access.
pub trait VectorIndex: Send + Sync {
    /// Get the embedding dimension
    fn dimension(&self) -> usize;

    /// Get the number of vectors in the index
    fn len(&self) -> usize;

    /// Check if the index is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a vector, returning its position.
    fn add(&mut self, embedding: &Embedding) -> Result<usize, VectorError>;

    /// Search for the k highest-scoring vectors.
    /// Returns at most k results sorted by descending score; equal scores
    /// keep insertion order.
    fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>, VectorError>;

    /// Get index statistics
    fn stats(&self) -> IndexStats;
}
