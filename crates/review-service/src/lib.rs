//! HTTP surface for the empathetic code reviewer.
//!
//! Endpoints:
//! - `POST /review`: code snippet plus review comments, returns the Markdown report
//! - `POST /analyze`: code snippet plus one question, same report shape
//! - `GET /health`: liveness probe

pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

pub use server::{create_router, run_server_with_shutdown, ServiceError};
pub use state::{AppState, DEFAULT_REQUEST_TIMEOUT};
pub use types::{AnalyzeRequest, AnalyzeResponse, HealthResponse, ReviewRequest, ReviewResponse};
