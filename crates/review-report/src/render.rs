//! Markdown rendering.
//!
//! The skeleton is fixed: title, the code under review, one `###` section per
//! comment separated by horizontal rules, the overall summary, and a closing
//! line. Downstream consumers parse this layout, so changes here are
//! breaking.

use std::fmt::Write;

use review_types::FeedbackResult;

use crate::assembler::Report;

pub const REPORT_TITLE: &str = "# Empathetic Code Review Report";

pub const CLOSING_LINE: &str =
    "*Remember: Every piece of feedback is an opportunity to grow. Keep coding and keep learning!* 🚀";

/// Render a complete report.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n## Code Under Review\n\n");
    push_fence(&mut out, &report.language, &report.code);

    for (i, section) in report.sections.iter().enumerate() {
        out.push_str(&render_section(
            i + 1,
            &section.comment,
            &section.feedback,
            &report.language,
        ));
    }

    out.push_str("## Overall Summary\n\n");
    out.push_str(&report.summary);
    out.push_str("\n\n");
    out.push_str(CLOSING_LINE);
    out
}

/// Render the section for comment number `index` (1-based).
pub fn render_section(
    index: usize,
    comment: &str,
    feedback: &FeedbackResult,
    language: &str,
) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "### Analysis of Comment {}: \"{}\"\n\n\
         **Positive Rephrasing:** {}\n\n\
         **The 'Why':** {}\n\n\
         **Suggested Improvement:**\n{}\n\n",
        index,
        comment,
        feedback.positive_rephrasing,
        feedback.the_why,
        feedback.suggested_improvement,
    );

    if !feedback.code_example.trim().is_empty() {
        push_fence(&mut out, language, &feedback.code_example);
    }

    if !feedback.resource_links.is_empty() {
        out.push_str("**Additional Resources:**\n");
        for link in &feedback.resource_links {
            let _ = writeln!(out, "- [{}]({})", link, link);
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
    out
}

fn push_fence(out: &mut String, language: &str, code: &str) {
    let _ = write!(out, "```{}\n{}\n```\n\n", language, code);
}
