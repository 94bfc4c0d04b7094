//! Error types for report assembly.

use thiserror::Error;

/// Conditions reported back to the caller instead of a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Empty code snippet or empty comment list.
    #[error("Error: Missing code snippet or review comments.")]
    MissingInput,
}
