//! Deterministic offline embedder.
//!
//! Feature hashing over lowercase word tokens. Not semantic, but texts that
//! share vocabulary land close together, which is enough for demos and tests.

use async_trait::async_trait;

use crate::error::EmbeddingError;
use crate::model::{Embedding, EmbeddingModel, ModelInfo};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Tokens shorter than this are ignored.
const MIN_TOKEN_LEN: usize = 3;

/// Hashing embedder; same input always yields the same vector.
pub struct HashEmbedder {
    info: ModelInfo,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            info: ModelInfo {
                name: "feature-hashing".to_string(),
                dimension,
            },
        }
    }

    /// Synchronous embedding; never fails for a non-zero dimension.
    pub fn embed_text(&self, text: &str) -> Embedding {
        let dimension = self.info.dimension;
        let mut values = vec![0.0f32; dimension];
        if dimension == 0 {
            return Embedding::from_normalized(values);
        }

        for token in tokenize(text) {
            let bucket = (fnv1a(token.as_bytes()) % dimension as u64) as usize;
            values[bucket] += 1.0;
        }

        Embedding::new(values)
    }
}

#[async_trait]
impl EmbeddingModel for HashEmbedder {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        if self.info.dimension == 0 {
            return Err(EmbeddingError::Config("dimension must be > 0".to_string()));
        }
        Ok(self.embed_text(text))
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .filter(|w| !is_stopword(w))
}

fn is_stopword(word: &str) -> bool {
    const STOPWORDS: &[&str] = &[
        "the", "and", "for", "that", "this", "with", "from", "have", "has", "are", "was",
        "been", "were", "will", "would", "could", "should", "there", "their", "what", "when",
        "where", "which", "about", "into", "than", "then", "them", "they", "not", "don",
        "can", "its", "you", "your",
    ];
    STOPWORDS.contains(&word)
}
