//! Embedding model trait and types.
//!
//! Defines the interface for generating vector embeddings from text.

use async_trait::async_trait;
use tracing::warn;

use crate::error::EmbeddingError;

/// Vector embedding - a float array normalized to unit length
/// (or all zeros for the fallback vector).
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    /// Create a new embedding from a vector.
    /// Normalizes the vector to unit length; the zero vector stays zero.
    pub fn new(values: Vec<f32>) -> Self {
        let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();
        let normalized = if norm > 0.0 {
            values.iter().map(|x| x / norm).collect()
        } else {
            values
        };
        Self { values: normalized }
    }

    /// Create embedding without normalization (for pre-normalized vectors)
    pub fn from_normalized(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// The zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            values: vec![0.0; dimension],
        }
    }

    /// Get the embedding dimension
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Inner product with another embedding.
    /// For unit vectors this is the cosine similarity, in [-1, 1].
    pub fn inner_product(&self, other: &Embedding) -> f32 {
        if self.values.len() != other.values.len() {
            return 0.0;
        }
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum()
    }
}

/// Model information
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name (e.g., "models/embedding-001")
    pub name: String,
    /// Embedding dimension
    pub dimension: usize,
}

/// Trait for embedding providers.
///
/// Implementations must be thread-safe (Send + Sync) for concurrent use.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Get model information
    fn info(&self) -> &ModelInfo;

    /// Generate embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;
}

/// Embed `text`, substituting the zero vector on any failure.
///
/// A vector of the wrong dimension is treated as a failure too, so callers
/// can always hand the result to an index of `model.info().dimension`.
pub async fn embed_or_zero(model: &dyn EmbeddingModel, text: &str) -> Embedding {
    let dimension = model.info().dimension;
    match model.embed(text).await {
        Ok(embedding) if embedding.dimension() == dimension => embedding,
        Ok(embedding) => {
            let error = EmbeddingError::DimensionMismatch {
                expected: dimension,
                actual: embedding.dimension(),
            };
            warn!(error = %error, "Embedding has wrong dimension, using zero vector");
            Embedding::zeros(dimension)
        }
        Err(e) => {
            warn!(error = %e, model = %model.info().name, "Embedding failed, using zero vector");
            Embedding::zeros(dimension)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedModel {
        info: ModelInfo,
        result: Option<Vec<f32>>,
    }

    #[async_trait]
    impl EmbeddingModel for FixedModel {
        fn info(&self) -> &ModelInfo {
            &self.info
        }

        async fn embed(&self, _text: &str) -> Result<Embedding, EmbeddingError> {
            self.result
                .clone()
                .map(Embedding::new)
                .ok_or_else(|| EmbeddingError::Request("connection refused".to_string()))
        }
    }

    fn fixed(dimension: usize, result: Option<Vec<f32>>) -> FixedModel {
        FixedModel {
            info: ModelInfo {
                name: "fixed".to_string(),
                dimension,
            },
            result,
        }
    }

    #[test]
    fn test_embedding_normalization() {
        let emb = Embedding::new(vec![3.0, 4.0]);
        // 3-4-5 triangle: normalized should be [0.6, 0.8]
        assert!((emb.values[0] - 0.6).abs() < 0.001);
        assert!((emb.values[1] - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_zero_vector_not_normalized() {
        let emb = Embedding::new(vec![0.0, 0.0, 0.0]);
        assert!(emb.is_zero());
        assert_eq!(emb, Embedding::zeros(3));
    }

    #[test]
    fn test_inner_product_identical() {
        let emb1 = Embedding::new(vec![1.0, 0.0, 0.0]);
        let emb2 = Embedding::new(vec![1.0, 0.0, 0.0]);
        assert!((emb1.inner_product(&emb2) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_inner_product_orthogonal() {
        let emb1 = Embedding::new(vec![1.0, 0.0]);
        let emb2 = Embedding::new(vec![0.0, 1.0]);
        assert!(emb1.inner_product(&emb2).abs() < 0.001);
    }

    #[test]
    fn test_inner_product_dimension_mismatch_is_zero() {
        let emb1 = Embedding::new(vec![1.0, 0.0]);
        let emb2 = Embedding::new(vec![1.0, 0.0, 0.0]);
        assert_eq!(emb1.inner_product(&emb2), 0.0);
    }

    #[tokio::test]
    async fn test_embed_or_zero_passes_through() {
        let model = fixed(2, Some(vec![0.0, 2.0]));
        let emb = embed_or_zero(&model, "text").await;
        assert_eq!(emb.values, vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn test_embed_or_zero_on_failure() {
        let model = fixed(4, None);
        let emb = embed_or_zero(&model, "text").await;
        assert_eq!(emb, Embedding::zeros(4));
    }

    #[tokio::test]
    async fn test_embed_or_zero_on_wrong_dimension() {
        let model = fixed(4, Some(vec![1.0, 1.0]));
        let emb = embed_or_zero(&model, "text").await;
        assert_eq!(emb, Embedding::zeros(4));
    }
}
