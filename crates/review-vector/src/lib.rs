//! # review-vector
//!
//! Vector index for knowledge-base retrieval.
//!
//! Scores are inner products of unit vectors (higher = more similar).
//! `FlatIndex` is an exact brute-force scan, which is plenty for a knowledge
//! base of tens to hundreds of entries; the `VectorIndex` trait leaves room
//! for an approximate structure later.

pub mod error;
pub mod flat;
pub mod index;

pub use error::VectorError;
pub use flat::FlatIndex;
pub use index::{IndexStats, SearchResult, VectorIndex};
