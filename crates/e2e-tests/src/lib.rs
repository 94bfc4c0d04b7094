//! End-to-end test infrastructure for the empathetic code reviewer.
//!
//! Provides a shared TestHarness wired with the deterministic hashing
//! embedder and a mock generator, so the full pipeline runs offline.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use review_embeddings::HashEmbedder;
use review_feedback::{GenerationError, MockGenerator, ResponseFormat, TextGenerator};
use review_report::ReportAssembler;
use review_retrieval::{builtin_catalog, load_knowledge_base, Retriever};
use review_service::{create_router, AppState};

/// Embedding dimension used by every harness.
pub const TEST_DIMENSION: usize = 768;

/// The sample from the reviewer's demo command.
pub const SAMPLE_CODE: &str = "def get_active_users(users):\n    results = []\n    for u in users:\n        if u.is_active == True and u.profile_complete == True:\n            results.append(u)\n    return results";

pub const SAMPLE_COMMENTS: [&str; 3] = [
    "This is inefficient. Don't loop twice conceptually.",
    "Variable 'u' is a bad name.",
    "Boolean comparison '== True' is redundant.",
];

/// Shared test harness for E2E tests.
pub struct TestHarness {
    pub retriever: Arc<Retriever>,
    pub assembler: Arc<ReportAssembler>,
}

impl TestHarness {
    /// Harness with the default mock generator.
    pub async fn new() -> Self {
        Self::with_generator(Arc::new(MockGenerator::new())).await
    }

    /// Harness around a caller-supplied generator.
    pub async fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        let embedder = Arc::new(HashEmbedder::new(TEST_DIMENSION));
        let knowledge = load_knowledge_base(embedder.as_ref(), builtin_catalog())
            .await
            .expect("Failed to load knowledge base");
        let retriever = Arc::new(
            Retriever::new(Arc::new(knowledge), embedder).expect("Failed to create retriever"),
        );
        let assembler = Arc::new(ReportAssembler::new(retriever.clone(), generator));

        Self {
            retriever,
            assembler,
        }
    }

    /// HTTP router over this harness's assembler.
    pub fn router(&self) -> Router {
        create_router(AppState::new(self.assembler.clone()))
    }
}

/// The `### Analysis of Comment N: "..."` headers of a report, in order.
pub fn section_headers(report: &str) -> Vec<&str> {
    report
        .lines()
        .filter(|line| line.starts_with("### Analysis of Comment "))
        .collect()
}

/// Wraps the mock generator and records every prompt it sees.
pub struct RecordingGenerator {
    inner: MockGenerator,
    prompts: Mutex<Vec<(ResponseFormat, String)>>,
}

impl RecordingGenerator {
    pub fn new(inner: MockGenerator) -> Self {
        Self {
            inner,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in arrival order.
    pub fn prompts(&self) -> Vec<(ResponseFormat, String)> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(
        &self,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push((format, prompt.to_string()));
        self.inner.generate(prompt, format).await
    }
}
