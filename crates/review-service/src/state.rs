//! Shared handler state: the report assembler and the request deadline.

use std::sync::Arc;
use std::time::Duration;

use review_report::ReportAssembler;

/// Default deadline for one review request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<ReportAssembler>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(assembler: Arc<ReportAssembler>) -> Self {
        Self {
            assembler,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
