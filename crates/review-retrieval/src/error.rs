//! Knowledge base error types.

use thiserror::Error;

/// Errors raised while building or querying the knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// The catalog has no entries
    #[error("Knowledge catalog is empty")]
    EmptyCatalog,

    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not a valid list of entries
    #[error("Invalid catalog {path}: {source}")]
    CatalogParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Knowledge base and embedder disagree on the vector dimension
    #[error("Dimension mismatch: knowledge base has {expected}, embedder produces {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vector index error
    #[error("Vector index error: {0}")]
    Index(#[from] review_vector::VectorError),
}
