//! Prompt construction for feedback and summary generation.

use std::sync::Arc;

use review_types::{KnowledgeItem, Severity};

/// Label that introduces the reviewer's comment in a feedback prompt.
pub const COMMENT_LINE_PREFIX: &str = "Original Comment: ";

/// Everything the synthesizer knows about one comment.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackContext<'a> {
    /// The code under review
    pub code: &'a str,
    /// Fence info string and language named in the prompt
    pub language: &'a str,
    /// The original review comment, verbatim
    pub comment: &'a str,
    pub severity: Severity,
    /// Retrieved knowledge, best match first
    pub knowledge: &'a [Arc<KnowledgeItem>],
}

impl<'a> FeedbackContext<'a> {
    /// Context with the default language (`python`).
    pub fn new(
        code: &'a str,
        comment: &'a str,
        severity: Severity,
        knowledge: &'a [Arc<KnowledgeItem>],
    ) -> Self {
        Self {
            code,
            language: "python",
            comment,
            severity,
            knowledge,
        }
    }

    pub fn with_language(mut self, language: &'a str) -> Self {
        self.language = language;
        self
    }

    /// Resource links of the retrieved knowledge, in retrieval order.
    pub fn resource_links(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.knowledge.iter().map(|item| item.resource_link.as_str())
    }
}

/// Tone instruction for a severity. One fixed string each.
pub fn tone_guidance(severity: Severity) -> &'static str {
    match severity {
        Severity::Harsh => {
            "The original comment was quite direct. Please be extra gentle and encouraging in your response."
        }
        Severity::Moderate => {
            "The original comment was moderately constructive. Maintain a supportive tone."
        }
        Severity::Neutral => {
            "The original comment was neutral. Provide balanced, educational feedback."
        }
    }
}

/// Build the per-comment feedback prompt.
pub fn build_feedback_prompt(ctx: &FeedbackContext<'_>) -> String {
    let knowledge = if ctx.knowledge.is_empty() {
        "- (no closely related best practices found)".to_string()
    } else {
        ctx.knowledge
            .iter()
            .map(|item| format!("- {}", item.content))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are an empathetic senior developer reviewing {language} code. Transform the following critical comment into constructive, educational feedback.

Code Snippet:
```{language}
{code}
```

{comment_prefix}"{comment}"

Severity Context: {tone}

Relevant Knowledge Context:
{knowledge}

Please provide:

1. **Positive Rephrasing**: Rewrite the comment to be encouraging and constructive while keeping it technically accurate. Start with something positive about the code.

2. **The 'Why'**: Explain the underlying software engineering principle or best practice so the developer understands the reasoning.

3. **Suggested Improvement**: Describe the recommended fix and give a concrete code example that applies directly to the snippet above.

Format your response as a JSON object with exactly these string keys: "positive_rephrasing", "the_why", "suggested_improvement", "code_example".

Be warm, encouraging, and educational. Focus on growth and learning rather than criticism."#,
        language = ctx.language,
        code = ctx.code,
        comment_prefix = COMMENT_LINE_PREFIX,
        comment = ctx.comment,
        tone = tone_guidance(ctx.severity),
        knowledge = knowledge,
    )
}

/// Build the closing summary prompt for `comment_count` review points.
pub fn build_summary_prompt(comment_count: usize) -> String {
    format!(
        r#"Based on the code review feedback provided, generate a brief, encouraging summary that:
1. Acknowledges the positive aspects of the original code
2. Highlights the main learning opportunities
3. Motivates the developer to continue improving
4. Keeps a warm, supportive tone

The original code had {} review points. Focus on growth and learning.
Keep the summary to 2-3 sentences maximum."#,
        comment_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_types::{CatalogEntry, Category};

    fn item(content: &str, link: &str) -> Arc<KnowledgeItem> {
        Arc::new(KnowledgeItem::new(
            CatalogEntry::new(content, Category::Pythonic, link),
            vec![0.0; 4],
        ))
    }

    #[test]
    fn test_tone_guidance_distinct() {
        let harsh = tone_guidance(Severity::Harsh);
        let moderate = tone_guidance(Severity::Moderate);
        let neutral = tone_guidance(Severity::Neutral);
        assert_ne!(harsh, moderate);
        assert_ne!(moderate, neutral);
        assert!(harsh.contains("extra gentle"));
    }

    #[test]
    fn test_feedback_prompt_contents() {
        let knowledge = vec![
            item("Truthiness can be evaluated directly.", "https://a"),
            item("Name things clearly.", "https://b"),
        ];
        let ctx = FeedbackContext::new(
            "def f(x): return x==True",
            "Boolean comparison is bad",
            Severity::Harsh,
            &knowledge,
        );

        let prompt = build_feedback_prompt(&ctx);
        assert!(prompt.contains("```python\ndef f(x): return x==True\n```"));
        assert!(prompt.contains("Original Comment: \"Boolean comparison is bad\""));
        assert!(prompt.contains(tone_guidance(Severity::Harsh)));
        assert!(prompt.contains("- Truthiness can be evaluated directly.\n- Name things clearly."));
        for key in ["positive_rephrasing", "the_why", "suggested_improvement", "code_example"] {
            assert!(prompt.contains(key));
        }
    }

    #[test]
    fn test_feedback_prompt_language_and_empty_knowledge() {
        let ctx = FeedbackContext::new("fn main() {}", "Add docs", Severity::Neutral, &[])
            .with_language("rust");

        let prompt = build_feedback_prompt(&ctx);
        assert!(prompt.contains("```rust\nfn main() {}\n```"));
        assert!(prompt.contains("reviewing rust code"));
        assert!(prompt.contains("no closely related best practices"));
    }

    #[test]
    fn test_resource_links_in_order() {
        let knowledge = vec![item("a", "https://x"), item("b", "https://y")];
        let ctx = FeedbackContext::new("x", "y", Severity::Neutral, &knowledge);
        let links: Vec<&str> = ctx.resource_links().collect();
        assert_eq!(links, vec!["https://x", "https://y"]);
    }

    #[test]
    fn test_summary_prompt_mentions_count() {
        let prompt = build_summary_prompt(3);
        assert!(prompt.contains("3 review points"));
        assert!(prompt.contains("2-3 sentences"));
    }
}
