//! Request and response bodies.

use serde::{Deserialize, Serialize};

use review_report::ReviewInput;

/// Body of `POST /review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code_snippet: String,
    pub review_comments: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl From<ReviewRequest> for ReviewInput {
    fn from(request: ReviewRequest) -> Self {
        ReviewInput {
            code_snippet: request.code_snippet,
            review_comments: request.review_comments,
            language: request.language,
        }
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub code_snippet: String,
    pub query: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl From<AnalyzeRequest> for ReviewInput {
    /// The query becomes the only review comment. A blank query yields no
    /// comment at all, so it is reported as missing input.
    fn from(request: AnalyzeRequest) -> Self {
        let review_comments = if request.query.trim().is_empty() {
            Vec::new()
        } else {
            vec![request.query]
        };
        ReviewInput {
            code_snippet: request.code_snippet,
            review_comments,
            language: request.language,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub markdown_report: String,
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
