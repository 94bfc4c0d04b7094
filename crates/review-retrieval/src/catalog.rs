//! Best-practice catalog.

use std::path::Path;

use review_types::{CatalogEntry, Category};
use tracing::info;

use crate::error::KnowledgeError;

/// The curated entries shipped with the reviewer, in load order.
pub fn builtin_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(
            "List comprehensions in Python are more efficient than traditional for loops with append operations because they are optimized at the C level and don't require multiple function calls.",
            Category::Performance,
            "https://docs.python.org/3/tutorial/datastructures.html#list-comprehensions",
        ),
        CatalogEntry::new(
            "Meaningful variable names improve code readability and maintainability. Single-letter variables should be avoided except for short loops or mathematical contexts.",
            Category::Readability,
            "https://pep8.org/#naming-conventions",
        ),
        CatalogEntry::new(
            "Comparing boolean values with == True or == False is redundant in Python. The truthiness of the value can be evaluated directly.",
            Category::Pythonic,
            "https://pep8.org/#programming-recommendations",
        ),
        CatalogEntry::new(
            "Code reviews should focus on improvement rather than criticism. Constructive feedback helps team members learn and grow.",
            Category::TeamDynamics,
            "https://google.github.io/eng-practices/review/reviewer/comments.html",
        ),
        CatalogEntry::new(
            "Performance optimizations should be considered when dealing with large datasets. Algorithm complexity matters for scalability.",
            Category::Performance,
            "https://wiki.python.org/moin/PythonSpeed/PerformanceTips",
        ),
        CatalogEntry::new(
            "Filter operations in functional programming can be combined with map operations for cleaner, more readable code.",
            Category::FunctionalProgramming,
            "https://docs.python.org/3/howto/functional.html",
        ),
        CatalogEntry::new(
            "Catching broad exceptions hides bugs. Handle the specific exceptions you expect and let unexpected errors surface with their original context.",
            Category::ErrorHandling,
            "https://docs.python.org/3/tutorial/errors.html#handling-exceptions",
        ),
        CatalogEntry::new(
            "Small, focused unit tests document intended behavior and make refactoring safe. Test edge cases such as empty inputs and boundary values.",
            Category::Testing,
            "https://docs.python.org/3/library/unittest.html",
        ),
        CatalogEntry::new(
            "Docstrings explain what a function does and what it returns, so readers do not have to reverse-engineer intent from the implementation.",
            Category::Documentation,
            "https://peps.python.org/pep-0257/",
        ),
        CatalogEntry::new(
            "Functions that do one thing are easier to name, test, and reuse. Long functions are a signal that a helper is waiting to be extracted.",
            Category::Readability,
            "https://google.github.io/styleguide/pyguide.html#318-function-length",
        ),
        CatalogEntry::new(
            "Boolean variables and predicates read best when named as questions, such as is_active or has_profile, so conditions read like plain sentences.",
            Category::Readability,
            "https://google.github.io/styleguide/pyguide.html#316-naming",
        ),
        CatalogEntry::new(
            "Early returns and guard clauses reduce nesting depth, keeping the main path of a function easy to follow.",
            Category::Readability,
            "https://refactoring.guru/replace-nested-conditional-with-guard-clauses",
        ),
    ]
}

/// Read a catalog from a JSON file holding a list of
/// `{content, category, resource_link}` objects.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Vec<CatalogEntry>, KnowledgeError> {
    let path = path.as_ref();
    let path_display = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::CatalogRead {
        path: path_display.clone(),
        source,
    })?;

    let entries: Vec<CatalogEntry> =
        serde_json::from_str(&raw).map_err(|source| KnowledgeError::CatalogParse {
            path: path_display.clone(),
            source,
        })?;

    if entries.is_empty() {
        return Err(KnowledgeError::EmptyCatalog);
    }

    info!(path = %path_display, entries = entries.len(), "Loaded knowledge catalog");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_keeps_original_entries_first() {
        let catalog = builtin_catalog();
        assert!(catalog.len() >= 6);
        assert_eq!(catalog[0].category, Category::Performance);
        assert_eq!(catalog[2].category, Category::Pythonic);
        assert!(catalog[2].content.contains("== True"));
        assert_eq!(catalog[5].category, Category::FunctionalProgramming);
    }

    #[test]
    fn test_builtin_catalog_contents_unique() {
        let catalog = builtin_catalog();
        let unique: HashSet<&str> = catalog.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(unique.len(), catalog.len());
        assert!(catalog.iter().all(|e| e.resource_link.starts_with("https://")));
    }

    #[test]
    fn test_load_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"content": "Prefer pathlib.", "category": "pythonic", "resource_link": "https://docs.python.org/3/library/pathlib.html"}}]"#
        )
        .unwrap();

        let entries = load_catalog_file(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, Category::Pythonic);
    }

    #[test]
    fn test_load_catalog_file_empty_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        assert!(matches!(
            load_catalog_file(file.path()),
            Err(KnowledgeError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_load_catalog_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"content": "not a list"}}"#).unwrap();
        assert!(matches!(
            load_catalog_file(file.path()),
            Err(KnowledgeError::CatalogParse { .. })
        ));
    }

    #[test]
    fn test_load_catalog_file_missing() {
        assert!(matches!(
            load_catalog_file("/nonexistent/catalog.json"),
            Err(KnowledgeError::CatalogRead { .. })
        ));
    }
}
