//! Report assembly.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use review_feedback::{
    build_summary_prompt, FeedbackContext, FeedbackSource, FeedbackSynthesizer, ResponseFormat,
    TextGenerator,
};
use review_retrieval::{Retriever, SeverityClassifier};
use review_types::{FeedbackResult, KnowledgeItem, Severity};

use crate::error::ReportError;
use crate::render::render_report;

/// Language assumed when the input does not name one.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Comments processed at once within a single report.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Summary used when the generator fails or returns nothing.
pub const FALLBACK_SUMMARY: &str = "Great work on submitting your code for review! The feedback \
provided will help you write even better code in the future. Keep up the excellent learning attitude!";

/// A review request: code plus the comments left on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub code_snippet: String,
    #[serde(default)]
    pub review_comments: Vec<String>,
    /// Fence language, `python` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ReviewInput {
    pub fn new<I, S>(code_snippet: impl Into<String>, review_comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code_snippet: code_snippet.into(),
            review_comments: review_comments.into_iter().map(Into::into).collect(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// The language to render with.
    pub fn language(&self) -> &str {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Whether the input can be reviewed at all.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.code_snippet.is_empty() || self.review_comments.is_empty() {
            return Err(ReportError::MissingInput);
        }
        Ok(())
    }
}

/// Feedback for one comment.
#[derive(Debug, Clone)]
pub struct CommentSection {
    /// The comment as submitted
    pub comment: String,
    pub severity: Severity,
    pub feedback: FeedbackResult,
    pub source: FeedbackSource,
}

/// A fully assembled review, before rendering.
#[derive(Debug, Clone)]
pub struct Report {
    pub language: String,
    pub code: String,
    /// One per input comment, in input order
    pub sections: Vec<CommentSection>,
    pub summary: String,
}

impl Report {
    pub fn render(&self) -> String {
        render_report(self)
    }
}

/// Drives retrieval, classification and synthesis for every comment.
pub struct ReportAssembler {
    retriever: Arc<Retriever>,
    classifier: SeverityClassifier,
    synthesizer: FeedbackSynthesizer,
    generator: Arc<dyn TextGenerator>,
    max_concurrency: usize,
}

impl ReportAssembler {
    pub fn new(retriever: Arc<Retriever>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            retriever,
            classifier: SeverityClassifier::new(),
            synthesizer: FeedbackSynthesizer::new(generator.clone()),
            generator,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_classifier(mut self, classifier: SeverityClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Limit in-flight comments per report. Zero is treated as one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Build and render the report.
    pub async fn assemble(&self, input: &ReviewInput) -> Result<String, ReportError> {
        Ok(self.assemble_report(input).await?.render())
    }

    /// Build the report without rendering it.
    ///
    /// Empty input is rejected before any provider is called. Provider
    /// failures never fail the report; they degrade to fallback text.
    pub async fn assemble_report(&self, input: &ReviewInput) -> Result<Report, ReportError> {
        input.validate()?;

        let language = input.language();
        let code = input.code_snippet.as_str();
        info!(
            comments = input.review_comments.len(),
            language,
            "Assembling review report"
        );

        // `buffered` yields in input order regardless of completion order
        let pending: Vec<_> = input
            .review_comments
            .iter()
            .map(|comment| self.analyze_comment(code, language, comment))
            .collect();
        let sections: Vec<CommentSection> = stream::iter(pending)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let summary = self.summarize(sections.len()).await;

        Ok(Report {
            language: language.to_string(),
            code: code.to_string(),
            sections,
            summary,
        })
    }

    async fn analyze_comment(&self, code: &str, language: &str, comment: &str) -> CommentSection {
        let knowledge: Vec<Arc<KnowledgeItem>> = self
            .retriever
            .retrieve(comment)
            .await
            .into_iter()
            .map(|r| r.item)
            .collect();
        let severity = self.classifier.classify(comment);

        let ctx = FeedbackContext::new(code, comment, severity, &knowledge).with_language(language);
        let synthesis = self.synthesizer.synthesize(&ctx).await;

        debug!(
            %severity,
            knowledge = knowledge.len(),
            source = ?synthesis.source,
            "Analyzed comment"
        );
        CommentSection {
            comment: comment.to_string(),
            severity,
            feedback: synthesis.feedback,
            source: synthesis.source,
        }
    }

    async fn summarize(&self, comment_count: usize) -> String {
        let prompt = build_summary_prompt(comment_count);
        match self.generator.generate(&prompt, ResponseFormat::Text).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Summary generation returned no text, using fallback");
                FALLBACK_SUMMARY.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Summary generation failed, using fallback");
                FALLBACK_SUMMARY.to_string()
            }
        }
    }
}
