//! Endpoint handlers.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use tracing::{info, warn};

use review_report::{ReportError, ReviewInput};

use crate::state::AppState;
use crate::types::{
    AnalyzeRequest, AnalyzeResponse, HealthResponse, ReviewRequest, ReviewResponse,
};

const TIMEOUT_MESSAGE: &str = "Review timed out before it could be completed.";

/// Why a report could not be produced.
enum Failure {
    Report(ReportError),
    TimedOut,
}

impl Failure {
    fn status(&self) -> StatusCode {
        match self {
            Failure::Report(ReportError::MissingInput) => StatusCode::BAD_REQUEST,
            Failure::TimedOut => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn message(&self) -> String {
        match self {
            Failure::Report(e) => e.to_string(),
            Failure::TimedOut => TIMEOUT_MESSAGE.to_string(),
        }
    }
}

/// Run the assembler under the request deadline. On timeout the report
/// future is dropped, which abandons any in-flight provider calls.
async fn run_review(state: &AppState, input: ReviewInput) -> Result<String, Failure> {
    match tokio::time::timeout(state.request_timeout, state.assembler.assemble(&input)).await {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(e)) => Err(Failure::Report(e)),
        Err(_) => {
            warn!(
                timeout_secs = state.request_timeout.as_secs(),
                comments = input.review_comments.len(),
                "Review request timed out"
            );
            Err(Failure::TimedOut)
        }
    }
}

/// POST /review
pub async fn review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> (StatusCode, Json<ReviewResponse>) {
    info!(comments = request.review_comments.len(), "POST /review");

    match run_review(&state, request.into()).await {
        Ok(markdown_report) => (
            StatusCode::OK,
            Json(ReviewResponse {
                markdown_report,
                success: true,
                message: String::new(),
            }),
        ),
        Err(failure) => (
            failure.status(),
            Json(ReviewResponse {
                markdown_report: String::new(),
                success: false,
                message: failure.message(),
            }),
        ),
    }
}

/// POST /analyze
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    info!("POST /analyze");

    match run_review(&state, request.into()).await {
        Ok(analysis) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                analysis,
                success: true,
                message: String::new(),
            }),
        ),
        Err(failure) => (
            failure.status(),
            Json(AnalyzeResponse {
                analysis: String::new(),
                success: false,
                message: failure.message(),
            }),
        ),
    }
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
