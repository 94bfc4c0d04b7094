//! Feedback synthesis: prompt, generate, parse, with fallbacks at each step.

use std::sync::Arc;

use tracing::{debug, warn};

use review_types::FeedbackResult;

use crate::generator::{ResponseFormat, TextGenerator};
use crate::parser::{parse_heuristic, parse_structured};
use crate::prompt::{build_feedback_prompt, FeedbackContext};

pub const FALLBACK_POSITIVE_REPHRASING: &str =
    "Thanks for sharing your code! There's an opportunity to improve this section.";
pub const FALLBACK_THE_WHY: &str = "Code improvements help with maintainability and performance.";
pub const FALLBACK_SUGGESTED_IMPROVEMENT: &str =
    "Consider refactoring this section for better clarity.";
pub const FALLBACK_CODE_EXAMPLE: &str = "# Improved version would go here";

/// Which path produced a feedback result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackSource {
    /// Parsed from a JSON object
    Structured,
    /// Recovered by the line scanner
    Heuristic,
    /// The generator failed; fixed text was substituted
    Fallback,
}

/// A feedback result plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    pub feedback: FeedbackResult,
    pub source: FeedbackSource,
}

/// Generic encouraging feedback used when the generator is unreachable.
pub fn fallback_feedback() -> FeedbackResult {
    FeedbackResult::new(
        FALLBACK_POSITIVE_REPHRASING,
        FALLBACK_THE_WHY,
        FALLBACK_SUGGESTED_IMPROVEMENT,
        FALLBACK_CODE_EXAMPLE,
    )
}

/// Turns one review comment into empathetic feedback.
#[derive(Clone)]
pub struct FeedbackSynthesizer {
    generator: Arc<dyn TextGenerator>,
}

impl FeedbackSynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Synthesize feedback for a comment. Never fails.
    pub async fn synthesize(&self, ctx: &FeedbackContext<'_>) -> Synthesis {
        let prompt = build_feedback_prompt(ctx);

        let response = match self.generator.generate(&prompt, ResponseFormat::Json).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, severity = %ctx.severity, "Feedback generation failed, using fallback");
                return Synthesis {
                    feedback: fallback_feedback(),
                    source: FeedbackSource::Fallback,
                };
            }
        };

        let (feedback, source) = match parse_structured(&response) {
            Ok(feedback) => (feedback, FeedbackSource::Structured),
            Err(e) => {
                debug!(error = %e, "Structured parse failed, scanning text");
                (parse_heuristic(&response), FeedbackSource::Heuristic)
            }
        };

        debug!(?source, links = ctx.knowledge.len(), "Synthesized feedback");
        Synthesis {
            feedback: feedback.with_resource_links(ctx.resource_links()),
            source,
        }
    }
}
