//! Severity classification for review comments.
//!
//! Case-insensitive substring match against two keyword lists. Harsh
//! indicators win over moderate ones; no match at all is neutral.

use serde::{Deserialize, Serialize};
use tracing::debug;

use review_types::Severity;

/// Keyword lists driving the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityConfig {
    /// Words that mark a comment as harsh
    pub harsh_keywords: Vec<String>,

    /// Words that mark a comment as moderate
    pub moderate_keywords: Vec<String>,
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            harsh_keywords: ["bad", "wrong", "terrible", "awful", "stupid", "inefficient"]
                .into_iter()
                .map(String::from)
                .collect(),
            moderate_keywords: ["should", "could", "consider", "might"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Result of severity classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityClassification {
    pub severity: Severity,

    /// Keywords of the winning list found in the comment
    pub matched_keywords: Vec<String>,
}

/// Keyword-based tone detector.
#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    harsh: Vec<String>,
    moderate: Vec<String>,
}

impl SeverityClassifier {
    /// Create a new classifier with the default keyword lists.
    pub fn new() -> Self {
        Self::with_config(SeverityConfig::default())
    }

    /// Create a classifier with custom keyword lists.
    pub fn with_config(config: SeverityConfig) -> Self {
        let lower = |words: Vec<String>| -> Vec<String> {
            words
                .into_iter()
                .map(|w| w.to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };

        Self {
            harsh: lower(config.harsh_keywords),
            moderate: lower(config.moderate_keywords),
        }
    }

    /// Classify the tone of a comment.
    pub fn classify(&self, comment: &str) -> Severity {
        self.classify_detailed(comment).severity
    }

    /// Classify and report which keywords decided it.
    pub fn classify_detailed(&self, comment: &str) -> SeverityClassification {
        let comment_lower = comment.to_lowercase();
        let matches = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .filter(|w| comment_lower.contains(w.as_str()))
                .cloned()
                .collect()
        };

        let harsh = matches(&self.harsh);
        let classification = if !harsh.is_empty() {
            SeverityClassification {
                severity: Severity::Harsh,
                matched_keywords: harsh,
            }
        } else {
            let moderate = matches(&self.moderate);
            let severity = if moderate.is_empty() {
                Severity::Neutral
            } else {
                Severity::Moderate
            };
            SeverityClassification {
                severity,
                matched_keywords: moderate,
            }
        };

        debug!(
            severity = %classification.severity,
            matched = ?classification.matched_keywords,
            "Classified comment"
        );
        classification
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harsh() {
        let classifier = SeverityClassifier::new();
        assert_eq!(classifier.classify("Boolean comparison is bad"), Severity::Harsh);
        assert_eq!(
            classifier.classify("This is inefficient. Don't loop twice conceptually."),
            Severity::Harsh
        );
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = SeverityClassifier::new();
        assert_eq!(classifier.classify("TERRIBLE naming"), Severity::Harsh);
        assert_eq!(classifier.classify("You Might extract this"), Severity::Moderate);
    }

    #[test]
    fn test_harsh_wins_over_moderate() {
        let classifier = SeverityClassifier::new();
        let result = classifier.classify_detailed("You should fix this, it is wrong");
        assert_eq!(result.severity, Severity::Harsh);
        assert_eq!(result.matched_keywords, vec!["wrong".to_string()]);
    }

    #[test]
    fn test_moderate() {
        let classifier = SeverityClassifier::new();
        assert_eq!(
            classifier.classify("Consider using a list comprehension"),
            Severity::Moderate
        );
    }

    #[test]
    fn test_neutral() {
        let classifier = SeverityClassifier::new();
        assert_eq!(
            classifier.classify("Boolean comparison '== True' is redundant."),
            Severity::Neutral
        );
        assert_eq!(classifier.classify(""), Severity::Neutral);
    }

    #[test]
    fn test_substring_match() {
        // "badge" contains "bad": substring semantics, not word matching
        let classifier = SeverityClassifier::new();
        assert_eq!(classifier.classify("Update the badge"), Severity::Harsh);
    }

    #[test]
    fn test_custom_keywords() {
        let classifier = SeverityClassifier::with_config(SeverityConfig {
            harsh_keywords: vec!["NOPE".to_string()],
            moderate_keywords: vec!["maybe".to_string()],
        });
        assert_eq!(classifier.classify("nope, not this"), Severity::Harsh);
        assert_eq!(classifier.classify("maybe rename"), Severity::Moderate);
        assert_eq!(classifier.classify("this is bad"), Severity::Neutral);
    }
}
