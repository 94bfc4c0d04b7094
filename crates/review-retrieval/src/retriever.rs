//! Similarity retrieval over the knowledge base.

use std::sync::Arc;

use review_embeddings::{embed_or_zero, EmbeddingModel};
use review_types::KnowledgeItem;
use tracing::{debug, warn};

use crate::error::KnowledgeError;
use crate::knowledge::KnowledgeBase;

/// Number of items fetched per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Results scoring at or below this are noise, not matches.
pub const DEFAULT_MIN_SCORE: f32 = 0.1;

/// Retrieval parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrieverConfig {
    pub top_k: usize,
    /// Exclusive lower bound on the similarity score
    pub min_score: f32,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// A knowledge item that matched a query.
#[derive(Debug, Clone)]
pub struct RetrievedKnowledge {
    pub item: Arc<KnowledgeItem>,
    pub score: f32,
}

/// Embeds a query and returns the best-matching knowledge.
pub struct Retriever {
    knowledge: Arc<KnowledgeBase>,
    embedder: Arc<dyn EmbeddingModel>,
    config: RetrieverConfig,
}

impl Retriever {
    /// Create a retriever with the default top-k and threshold.
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        embedder: Arc<dyn EmbeddingModel>,
    ) -> Result<Self, KnowledgeError> {
        Self::with_config(knowledge, embedder, RetrieverConfig::default())
    }

    pub fn with_config(
        knowledge: Arc<KnowledgeBase>,
        embedder: Arc<dyn EmbeddingModel>,
        config: RetrieverConfig,
    ) -> Result<Self, KnowledgeError> {
        let actual = embedder.info().dimension;
        if knowledge.dimension() != actual {
            return Err(KnowledgeError::DimensionMismatch {
                expected: knowledge.dimension(),
                actual,
            });
        }
        Ok(Self {
            knowledge,
            embedder,
            config,
        })
    }

    /// Retrieve with the configured top-k.
    pub async fn retrieve(&self, query: &str) -> Vec<RetrievedKnowledge> {
        self.retrieve_top(query, self.config.top_k).await
    }

    /// At most `k` items scoring above the threshold, best first.
    ///
    /// Never fails: an unembeddable query becomes the zero vector and
    /// retrieves nothing.
    pub async fn retrieve_top(&self, query: &str, k: usize) -> Vec<RetrievedKnowledge> {
        let embedding = embed_or_zero(self.embedder.as_ref(), query).await;

        let results = match self.knowledge.search(&embedding, k) {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Knowledge search failed, continuing without context");
                return Vec::new();
            }
        };

        let matches: Vec<RetrievedKnowledge> = results
            .into_iter()
            .filter(|(score, _)| *score > self.config.min_score)
            .map(|(score, item)| RetrievedKnowledge { item, score })
            .collect();

        debug!(k, found = matches.len(), "Retrieved knowledge");
        matches
    }
}
