//! Mock generator for testing and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use super::{GenerationError, ResponseFormat, TextGenerator};
use crate::prompt::COMMENT_LINE_PREFIX;

/// Summary text returned by the default mock.
const MOCK_SUMMARY: &str = "You took on every point raised in this review, and each one is a \
small step toward code that is easier to read and change. Keep that curiosity going!";

/// Mock generator that produces deterministic responses.
///
/// JSON requests get a feedback object built from the comment found in the
/// prompt; text requests get a fixed summary. Canned responses and an
/// always-failing mode are available for exercising fallback paths.
pub struct MockGenerator {
    feedback_response: Option<String>,
    summary_response: Option<String>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Create a new mock generator.
    pub fn new() -> Self {
        Self {
            feedback_response: None,
            summary_response: None,
            unavailable: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A generator whose every call fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    /// Return `response` verbatim for JSON requests.
    pub fn with_feedback_response(mut self, response: impl Into<String>) -> Self {
        self.feedback_response = Some(response.into());
        self
    }

    /// Return `response` verbatim for text requests.
    pub fn with_summary_response(mut self, response: impl Into<String>) -> Self {
        self.summary_response = Some(response.into());
        self
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn default_feedback(prompt: &str) -> String {
        let comment = extract_comment(prompt).unwrap_or("this part of the code");
        json!({
            "positive_rephrasing": format!(
                "You're off to a solid start here. One idea to build on: {}",
                comment
            ),
            "the_why": "Small, deliberate changes like this keep code clear for the next reader.",
            "suggested_improvement": format!("Revisit this section with \"{}\" in mind.", comment),
            "code_example": "# Revised version of the snippet",
        })
        .to_string()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the original comment back out of a feedback prompt.
fn extract_comment(prompt: &str) -> Option<&str> {
    prompt.lines().find_map(|line| {
        line.trim()
            .strip_prefix(COMMENT_LINE_PREFIX)
            .map(|rest| rest.trim().trim_matches('"'))
    })
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.unavailable {
            return Err(GenerationError::ApiError(
                "mock provider unavailable".to_string(),
            ));
        }

        Ok(match format {
            ResponseFormat::Json => self
                .feedback_response
                .clone()
                .unwrap_or_else(|| Self::default_feedback(prompt)),
            ResponseFormat::Text => self
                .summary_response
                .clone()
                .unwrap_or_else(|| MOCK_SUMMARY.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_feedback_mentions_comment() {
        let generator = MockGenerator::new();
        let prompt = format!("intro\n{}\"Variable 'u' is a bad name.\"\nmore", COMMENT_LINE_PREFIX);

        let text = generator.generate(&prompt, ResponseFormat::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert!(value["positive_rephrasing"]
            .as_str()
            .unwrap()
            .contains("Variable 'u' is a bad name."));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_default_summary() {
        let generator = MockGenerator::new();
        let text = generator.generate("summary", ResponseFormat::Text).await.unwrap();
        assert_eq!(text, MOCK_SUMMARY);
    }

    #[tokio::test]
    async fn test_canned_responses() {
        let generator = MockGenerator::new()
            .with_feedback_response("not json")
            .with_summary_response("Well done.");

        assert_eq!(
            generator.generate("p", ResponseFormat::Json).await.unwrap(),
            "not json"
        );
        assert_eq!(
            generator.generate("p", ResponseFormat::Text).await.unwrap(),
            "Well done."
        );
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_counts_calls() {
        let generator = MockGenerator::unavailable();
        assert!(generator.generate("p", ResponseFormat::Json).await.is_err());
        assert!(generator.generate("p", ResponseFormat::Text).await.is_err());
        assert_eq!(generator.calls(), 2);
    }
}
