//! # review-retrieval
//!
//! The retrieval half of the reviewer:
//! - Catalog: curated best-practice entries (built in, or from a JSON file)
//! - Knowledge base: entries embedded once at startup, then frozen
//! - Retriever: top-k knowledge above a similarity threshold for a comment
//! - Severity classifier: keyword heuristic for the tone of a comment

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod knowledge;
pub mod retriever;

pub use catalog::{builtin_catalog, load_catalog_file};
pub use classifier::{SeverityClassification, SeverityClassifier, SeverityConfig};
pub use error::KnowledgeError;
pub use knowledge::{load_knowledge_base, KnowledgeBase, KnowledgeBaseBuilder};
pub use retriever::{
    RetrievedKnowledge, Retriever, RetrieverConfig, DEFAULT_MIN_SCORE, DEFAULT_TOP_K,
};
