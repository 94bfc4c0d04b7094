//! # review-report
//!
//! Turns a code snippet and its review comments into one Markdown report.
//!
//! For every comment the assembler retrieves related best practices,
//! classifies the comment's tone and synthesizes empathetic feedback. A
//! closing summary pass follows. Sections always appear in input order.

pub mod assembler;
pub mod error;
pub mod render;

pub use assembler::{
    CommentSection, Report, ReportAssembler, ReviewInput, DEFAULT_LANGUAGE,
    DEFAULT_MAX_CONCURRENCY, FALLBACK_SUMMARY,
};
pub use error::ReportError;
pub use render::{render_report, render_section, CLOSING_LINE, REPORT_TITLE};
