//! Exact brute-force inner-product index.

use review_embeddings::Embedding;
use tracing::debug;

use crate::error::VectorError;
use crate::index::{IndexStats, SearchResult, VectorIndex};

/// Flat index: every search scores every stored vector.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Embedding>,
}

impl FlatIndex {
    /// Create an empty index for vectors of `dimension`.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Vector stored at `position`
    pub fn get(&self, position: usize) -> Option<&Embedding> {
        self.vectors.get(position)
    }
}

impl VectorIndex for FlatIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn add(&mut self, embedding: &Embedding) -> Result<usize, VectorError> {
        if embedding.dimension() != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.dimension(),
            });
        }

        let position = self.vectors.len();
        self.vectors.push(embedding.clone());
        debug!(position, "Added vector");
        Ok(position)
    }

    fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>, VectorError> {
        if query.dimension() != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                actual: query.dimension(),
            });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut results: Vec<SearchResult> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| SearchResult::new(position, query.inner_product(vector)))
            .collect();

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.position.cmp(&b.position))
        });
        results.truncate(k);

        debug!(k = k, found = results.len(), "Search complete");
        Ok(results)
    }

    fn stats(&self) -> IndexStats {
        IndexStats {
            vector_count: self.vectors.len(),
            dimension: self.dimension,
            zero_vectors: self.vectors.iter().filter(|v| v.is_zero()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(values: &[f32]) -> Embedding {
        Embedding::new(values.to_vec())
    }

    #[test]
    fn test_create_index() {
        let index = FlatIndex::new(768);
        assert_eq!(index.dimension(), 768);
        assert_eq!(index.len(), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_add_returns_positions() {
        let mut index = FlatIndex::new(2);
        assert_eq!(index.add(&unit(&[1.0, 0.0])).unwrap(), 0);
        assert_eq!(index.add(&unit(&[0.0, 1.0])).unwrap(), 1);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(1), Some(&unit(&[0.0, 1.0])));
    }

    #[test]
    fn test_search_sorted_descending() {
        let mut index = FlatIndex::new(2);
        index.add(&unit(&[0.0, 1.0])).unwrap();
        index.add(&unit(&[1.0, 0.0])).unwrap();
        index.add(&unit(&[1.0, 1.0])).unwrap();

        let results = index.search(&unit(&[1.0, 0.2]), 3).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].position, 1);
        assert_eq!(results[1].position, 2);
        assert_eq!(results[2].position, 0);
        for i in 1..results.len() {
            assert!(results[i - 1].score >= results[i].score);
        }
    }

    #[test]
    fn test_search_truncates_to_k() {
        let mut index = FlatIndex::new(2);
        for _ in 0..10 {
            index.add(&unit(&[1.0, 0.0])).unwrap();
        }
        assert_eq!(index.search(&unit(&[1.0, 0.0]), 3).unwrap().len(), 3);
        assert!(index.search(&unit(&[1.0, 0.0]), 0).unwrap().is_empty());
    }

    #[test]
    fn test_k_larger_than_index() {
        let mut index = FlatIndex::new(2);
        index.add(&unit(&[1.0, 0.0])).unwrap();
        assert_eq!(index.search(&unit(&[1.0, 0.0]), 5).unwrap().len(), 1);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut index = FlatIndex::new(2);
        index.add(&unit(&[0.0, 1.0])).unwrap();
        index.add(&unit(&[1.0, 0.0])).unwrap();
        index.add(&unit(&[1.0, 0.0])).unwrap();
        index.add(&unit(&[1.0, 0.0])).unwrap();

        let results = index.search(&unit(&[1.0, 0.0]), 2).unwrap();
        let positions: Vec<usize> = results.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_zero_query_scores_zero() {
        let mut index = FlatIndex::new(2);
        index.add(&unit(&[1.0, 0.0])).unwrap();
        index.add(&Embedding::zeros(2)).unwrap();

        let results = index.search(&Embedding::zeros(2), 2).unwrap();
        assert!(results.iter().all(|r| r.score == 0.0));
        assert_eq!(index.stats().zero_vectors, 1);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = FlatIndex::new(4);
        let result = index.add(&unit(&[1.0, 0.0]));
        assert!(matches!(result, Err(VectorError::DimensionMismatch { .. })));

        let result = index.search(&unit(&[1.0, 0.0]), 1);
        assert!(matches!(
            result,
            Err(VectorError::DimensionMismatch {
                expected: 4,
                actual: 2
            })
        ));
    }
}
