//! Knowledge base records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Topic tag for a knowledge item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Performance,
    Readability,
    Pythonic,
    TeamDynamics,
    FunctionalProgramming,
    ErrorHandling,
    Testing,
    Documentation,
    /// Any tag not known to this build (catalog files may carry their own)
    #[serde(other)]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Readability => "readability",
            Category::Pythonic => "pythonic",
            Category::TeamDynamics => "team_dynamics",
            Category::FunctionalProgramming => "functional_programming",
            Category::ErrorHandling => "error_handling",
            Category::Testing => "testing",
            Category::Documentation => "documentation",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry before it has been embedded.
///
/// This is also the on-disk shape of a custom catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The curated fact
    pub content: String,
    /// Topic tag
    pub category: Category,
    /// Where to read more
    pub resource_link: String,
}

impl CatalogEntry {
    pub fn new(
        content: impl Into<String>,
        category: Category,
        resource_link: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            category,
            resource_link: resource_link.into(),
        }
    }
}

/// An embedded knowledge item.
///
/// Created once while the knowledge base is loaded and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub content: String,
    pub category: Category,
    pub resource_link: String,
    /// Embedding of `content` as returned by the embedding provider
    /// (the zero vector when embedding failed)
    #[serde(skip)]
    pub embedding: Vec<f32>,
}

impl KnowledgeItem {
    pub fn new(entry: CatalogEntry, embedding: Vec<f32>) -> Self {
        Self {
            content: entry.content,
            category: entry.category,
            resource_link: entry.resource_link,
            embedding,
        }
    }
}
