//! Structured feedback for one review comment.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The empathetic rewrite of a single comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResult {
    /// Encouraging restatement of the original comment
    pub positive_rephrasing: String,
    /// The principle behind the comment
    pub the_why: String,
    /// What to change, in prose
    pub suggested_improvement: String,
    /// Example code for the change (may be empty)
    pub code_example: String,
    /// Links from the retrieved knowledge, deduplicated in first-seen order
    #[serde(default)]
    pub resource_links: Vec<String>,
}

impl FeedbackResult {
    pub fn new(
        positive_rephrasing: impl Into<String>,
        the_why: impl Into<String>,
        suggested_improvement: impl Into<String>,
        code_example: impl Into<String>,
    ) -> Self {
        Self {
            positive_rephrasing: positive_rephrasing.into(),
            the_why: the_why.into(),
            suggested_improvement: suggested_improvement.into(),
            code_example: code_example.into(),
            resource_links: Vec::new(),
        }
    }

    /// Replace the resource links, dropping duplicates.
    pub fn with_resource_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resource_links = dedup_links(links);
        self
    }

    /// True when none of the four text fields carries any content.
    pub fn is_blank(&self) -> bool {
        self.positive_rephrasing.trim().is_empty()
            && self.the_why.trim().is_empty()
            && self.suggested_improvement.trim().is_empty()
            && self.code_example.trim().is_empty()
    }
}

/// Deduplicate links, keeping the first occurrence of each.
pub fn dedup_links<I, S>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    links
        .into_iter()
        .map(Into::into)
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_links_keeps_first_seen_order() {
        let links = dedup_links(["b", "a", "b", "c", "a"]);
        assert_eq!(links, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_with_resource_links() {
        let result = FeedbackResult::new("nice", "because", "do this", "")
            .with_resource_links(vec!["https://pep8.org", "https://pep8.org"]);
        assert_eq!(result.resource_links, vec!["https://pep8.org".to_string()]);
    }

    #[test]
    fn test_is_blank() {
        assert!(FeedbackResult::default().is_blank());
        assert!(!FeedbackResult::new("", "why", "", "").is_blank());
    }
}
