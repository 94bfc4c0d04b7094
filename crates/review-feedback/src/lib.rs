//! Feedback generation for the empathetic code reviewer.
//!
//! Provides:
//! - Pluggable text generation (hosted API and a deterministic mock)
//! - Prompt builders for per-comment feedback and the closing summary
//! - A structured parser with a line-oriented fallback
//! - The feedback synthesizer, which always returns a usable result

pub mod generator;
pub mod parser;
pub mod prompt;
pub mod synthesizer;

pub use generator::{
    ApiGenerator, ApiGeneratorConfig, GenerationError, MockGenerator, ResponseFormat,
    TextGenerator,
};
pub use parser::{extract_json, parse_heuristic, parse_structured, ParseError};
pub use prompt::{build_feedback_prompt, build_summary_prompt, tone_guidance, FeedbackContext};
pub use synthesizer::{
    fallback_feedback, FeedbackSource, FeedbackSynthesizer, Synthesis, FALLBACK_CODE_EXAMPLE,
    FALLBACK_POSITIVE_REPHRASING, FALLBACK_SUGGESTED_IMPROVEMENT, FALLBACK_THE_WHY,
};
