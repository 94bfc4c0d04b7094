//! Knowledge base construction.
//!
//! The knowledge base is built once at startup and frozen: the builder owns
//! the only mutable path, and `build()` hands back a read-only value that is
//! shared behind an `Arc` by every request.

use std::sync::Arc;

use review_embeddings::{embed_or_zero, Embedding, EmbeddingModel};
use review_types::{CatalogEntry, KnowledgeItem};
use review_vector::{FlatIndex, IndexStats, VectorIndex};
use tracing::{debug, info, warn};

use crate::error::KnowledgeError;

/// Appends items and their vectors side by side.
pub struct KnowledgeBaseBuilder {
    items: Vec<Arc<KnowledgeItem>>,
    index: Box<dyn VectorIndex>,
}

impl KnowledgeBaseBuilder {
    /// Builder over an exact flat index of `dimension`.
    pub fn new(dimension: usize) -> Self {
        Self::with_index(Box::new(FlatIndex::new(dimension)))
    }

    /// Builder over a caller-supplied index, which must be empty.
    pub fn with_index(index: Box<dyn VectorIndex>) -> Self {
        debug_assert!(index.is_empty());
        Self {
            items: Vec::new(),
            index,
        }
    }

    /// Append one entry with its embedding. Returns the entry's position.
    ///
    /// The vector is added first; if the index rejects it nothing is stored,
    /// so items and vectors never drift apart.
    pub fn push(
        &mut self,
        entry: CatalogEntry,
        embedding: Embedding,
    ) -> Result<usize, KnowledgeError> {
        let position = self.index.add(&embedding)?;
        debug_assert_eq!(position, self.items.len());
        self.items
            .push(Arc::new(KnowledgeItem::new(entry, embedding.values)));
        Ok(position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Freeze the knowledge base.
    pub fn build(self) -> KnowledgeBase {
        KnowledgeBase {
            items: self.items,
            index: self.index,
        }
    }
}

/// Read-only knowledge base: item `i` is the payload of index vector `i`.
pub struct KnowledgeBase {
    items: Vec<Arc<KnowledgeItem>>,
    index: Box<dyn VectorIndex>,
}

impl KnowledgeBase {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    pub fn get(&self, position: usize) -> Option<&Arc<KnowledgeItem>> {
        self.items.get(position)
    }

    pub fn items(&self) -> &[Arc<KnowledgeItem>] {
        &self.items
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// The k most similar items with their scores, best first.
    pub fn search(
        &self,
        query: &Embedding,
        k: usize,
    ) -> Result<Vec<(f32, Arc<KnowledgeItem>)>, KnowledgeError> {
        let results = self.index.search(query, k)?;
        Ok(results
            .into_iter()
            .filter_map(|r| self.items.get(r.position).map(|item| (r.score, item.clone())))
            .collect())
    }
}

/// Embed every catalog entry exactly once and freeze the result.
///
/// An entry whose embedding fails is still loaded, with the zero vector,
/// so one provider hiccup never aborts startup.
pub async fn load_knowledge_base(
    embedder: &dyn EmbeddingModel,
    entries: Vec<CatalogEntry>,
) -> Result<KnowledgeBase, KnowledgeError> {
    if entries.is_empty() {
        return Err(KnowledgeError::EmptyCatalog);
    }

    let dimension = embedder.info().dimension;
    info!(
        entries = entries.len(),
        model = %embedder.info().name,
        dimension,
        "Loading knowledge base"
    );

    let mut builder = KnowledgeBaseBuilder::new(dimension);
    for entry in entries {
        let embedding = embed_or_zero(embedder, &entry.content).await;
        let position = builder.push(entry, embedding)?;
        debug!(position, "Embedded knowledge entry");
    }

    let knowledge = builder.build();
    let stats = knowledge.stats();
    if stats.zero_vectors > 0 {
        warn!(
            zero_vectors = stats.zero_vectors,
            total = stats.vector_count,
            "Some knowledge entries could not be embedded and will never be retrieved"
        );
    }
    info!(items = knowledge.len(), "Knowledge base ready");
    Ok(knowledge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use review_embeddings::{EmbeddingError, HashEmbedder, ModelInfo};
    use review_types::Category;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::catalog::builtin_catalog;

    /// Fails on every other call and counts calls.
    struct FlakyEmbedder {
        inner: HashEmbedder,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingModel for FlakyEmbedder {
        fn info(&self) -> &ModelInfo {
            self.inner.info()
        }

        async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 1 {
                return Err(EmbeddingError::Request("timeout".to_string()));
            }
            self.inner.embed(text).await
        }
    }

    fn entry(content: &str) -> CatalogEntry {
        CatalogEntry::new(content, Category::Readability, "https://example.com")
    }

    #[test]
    fn test_builder_keeps_alignment_on_rejected_vector() {
        let mut builder = KnowledgeBaseBuilder::new(2);
        builder
            .push(entry("first"), Embedding::new(vec![1.0, 0.0]))
            .unwrap();
        let result = builder.push(entry("wrong"), Embedding::new(vec![1.0, 0.0, 0.0]));
        assert!(matches!(result, Err(KnowledgeError::Index(_))));
        builder
            .push(entry("second"), Embedding::new(vec![0.0, 1.0]))
            .unwrap();

        let knowledge = builder.build();
        assert_eq!(knowledge.len(), 2);
        assert_eq!(knowledge.stats().vector_count, 2);
        assert_eq!(knowledge.get(1).unwrap().content, "second");
    }

    #[test]
    fn test_search_maps_positions_to_items() {
        let mut builder = KnowledgeBaseBuilder::new(2);
        builder
            .push(entry("x axis"), Embedding::new(vec![1.0, 0.0]))
            .unwrap();
        builder
            .push(entry("y axis"), Embedding::new(vec![0.0, 1.0]))
            .unwrap();
        let knowledge = builder.build();

        let results = knowledge.search(&Embedding::new(vec![0.1, 1.0]), 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].1.content, "y axis");
        assert!(results[0].0 > 0.9);
    }

    #[tokio::test]
    async fn test_load_builtin_catalog() {
        let embedder = HashEmbedder::new(768);
        let catalog = builtin_catalog();
        let expected = catalog.len();

        let knowledge = load_knowledge_base(&embedder, catalog).await.unwrap();
        assert_eq!(knowledge.len(), expected);
        assert_eq!(knowledge.stats().vector_count, expected);
        assert_eq!(knowledge.dimension(), 768);
        assert!(knowledge
            .items()
            .iter()
            .all(|item| item.embedding.len() == 768));
    }

    #[tokio::test]
    async fn test_load_survives_embedding_failures() {
        let embedder = FlakyEmbedder {
            inner: HashEmbedder::new(64),
            calls: AtomicUsize::new(0),
        };
        let entries = vec![
            entry("meaningful names"),
            entry("list comprehensions"),
            entry("boolean comparison"),
            entry("guard clauses"),
        ];

        let knowledge = load_knowledge_base(&embedder, entries).await.unwrap();
        assert_eq!(knowledge.len(), 4);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 4);
        assert_eq!(knowledge.stats().zero_vectors, 2);
        assert!(knowledge.get(1).unwrap().embedding.iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_load_empty_catalog() {
        let embedder = HashEmbedder::new(8);
        let result = load_knowledge_base(&embedder, Vec::new()).await;
        assert!(matches!(result, Err(KnowledgeError::EmptyCatalog)));
    }
}
