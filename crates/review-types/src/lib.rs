//! # review-types
//!
//! Shared domain types for the empathetic code reviewer.
//!
//! This crate defines the data structures passed between the pipeline stages:
//! - Knowledge items: curated best-practice facts with a resource link
//! - Severity: heuristic tone of an incoming review comment
//! - Feedback results: the four-field rewrite of a single comment
//! - Settings: layered configuration for the daemon and its providers

pub mod config;
pub mod error;
pub mod feedback;
pub mod knowledge;
pub mod severity;

pub use config::{
    KnowledgeSettings, ProviderKind, ProviderSettings, ReviewSettings, Settings,
    PLACEHOLDER_API_KEY,
};
pub use error::ReviewError;
pub use feedback::{dedup_links, FeedbackResult};
pub use knowledge::{CatalogEntry, Category, KnowledgeItem};
pub use severity::Severity;
