//! Parsing generator output into a [`FeedbackResult`].
//!
//! Structured JSON is tried first. When that fails the caller falls back to
//! [`parse_heuristic`], a line scanner keyed on section headers.

use serde_json::{Map, Value};
use thiserror::Error;

use review_types::FeedbackResult;

const FIELDS: [&str; 4] = [
    "positive_rephrasing",
    "the_why",
    "suggested_improvement",
    "code_example",
];

/// Why a response could not be read as structured feedback.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Response is not a JSON object: {0}")]
    InvalidJson(String),

    #[error("Response has none of the feedback fields")]
    MissingFields,

    #[error("Field '{0}' is not a string")]
    NonStringField(&'static str),
}

/// Narrow generator text to the JSON it most likely contains.
///
/// A fence only counts when it opens the text; its body runs to the last
/// closing fence, so fences inside JSON strings stay intact. Otherwise the
/// span from the first `{` to the last `}` is taken.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Skip the info string, e.g. "json".
        let body = rest.find('\n').map_or("", |nl| &rest[nl + 1..]);
        let body = match body.rfind("```") {
            Some(end) => &body[..end],
            None => body,
        };
        return body.trim();
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Parse a JSON feedback object.
///
/// Absent fields become empty strings; at least one must be present, and
/// every present field must be a string (or null).
pub fn parse_structured(text: &str) -> Result<FeedbackResult, ParseError> {
    let object: Map<String, Value> = match serde_json::from_str(text.trim()) {
        Ok(object) => object,
        Err(_) => serde_json::from_str(extract_json(text))
            .map_err(|e| ParseError::InvalidJson(e.to_string()))?,
    };

    let mut values: [String; 4] = Default::default();
    let mut found = 0;
    for (slot, field) in values.iter_mut().zip(FIELDS) {
        match object.get(field) {
            None => {}
            Some(Value::Null) => found += 1,
            Some(Value::String(s)) => {
                *slot = s.trim().to_string();
                found += 1;
            }
            Some(_) => return Err(ParseError::NonStringField(field)),
        }
    }

    if found == 0 {
        return Err(ParseError::MissingFields);
    }

    let [positive_rephrasing, the_why, suggested_improvement, code_example] = values;
    Ok(FeedbackResult::new(
        positive_rephrasing,
        the_why,
        suggested_improvement,
        code_example,
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    PositiveRephrasing,
    Why,
    Improvement,
    Code,
}

/// Recover feedback from free-form text.
///
/// A line whose lowercase text mentions "positive rephrasing", "why" or
/// "improvement" (checked in that order) switches the active section; the
/// header line itself is not kept. A line starting with a code fence toggles
/// the code section. Other non-empty lines are trimmed and space-joined onto
/// the active section. Text before the first header is dropped.
pub fn parse_heuristic(text: &str) -> FeedbackResult {
    let mut positive = Vec::new();
    let mut why = Vec::new();
    let mut improvement = Vec::new();
    let mut code = Vec::new();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        let line = line.trim();
        let lower = line.to_lowercase();

        if lower.contains("positive rephrasing") {
            current = Some(Section::PositiveRephrasing);
        } else if lower.contains("why") {
            current = Some(Section::Why);
        } else if lower.contains("improvement") {
            current = Some(Section::Improvement);
        } else if line.starts_with("```") {
            current = if current == Some(Section::Code) {
                None
            } else {
                Some(Section::Code)
            };
        } else if !line.is_empty() {
            match current {
                Some(Section::PositiveRephrasing) => positive.push(line),
                Some(Section::Why) => why.push(line),
                Some(Section::Improvement) => improvement.push(line),
                Some(Section::Code) => code.push(line),
                None => {}
            }
        }
    }

    FeedbackResult::new(
        positive.join(" "),
        why.join(" "),
        improvement.join(" "),
        code.join(" "),
    )
}
