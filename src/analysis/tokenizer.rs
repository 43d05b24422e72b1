//! Tokenizer implementations for query and document text.
//!
//! # Examples
//!
//! ```
//! use querywise::analysis::tokenizer::tokenize;
//!
//! assert_eq!(tokenize("grade-12_science test"), vec!["grade", "12", "science", "test"]);
//! assert!(tokenize("   ").is_empty());
//! ```

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

/// Separator pattern used by the default tokenizer: runs of whitespace,
/// hyphens or underscores.
pub const DEFAULT_SEPARATOR_PATTERN: &str = r"[\s\-_]+";

lazy_static! {
    static ref DEFAULT_TOKENIZER: SeparatorTokenizer = SeparatorTokenizer::default();
}

/// Trait for tokenizers that split text into word tokens.
///
/// Tokenizers are stateless and must be usable from many threads at once.
pub trait Tokenizer: Send + Sync {
    /// Split `text` into tokens. Empty tokens are never produced.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits on a separator regex and keeps the text between
/// matches.
///
/// Case is preserved; callers lower-case tokens where they need to.
#[derive(Clone, Debug)]
pub struct SeparatorTokenizer {
    separator: Arc<Regex>,
}

impl SeparatorTokenizer {
    /// Create a tokenizer with the default separator pattern.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SeparatorTokenizer {
    fn default() -> Self {
        SeparatorTokenizer {
            separator: Arc::new(
                Regex::new(DEFAULT_SEPARATOR_PATTERN).expect("separator pattern is valid"),
            ),
        }
    }
}

impl Tokenizer for SeparatorTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.separator
            .split(text)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn name(&self) -> &'static str {
        "separator"
    }
}

/// Tokenize `text` with the default separator tokenizer.
pub fn tokenize(text: &str) -> Vec<String> {
    DEFAULT_TOKENIZER.tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_whitespace_hyphen_underscore() {
        assert_eq!(
            tokenize("grade-12_science test"),
            vec!["grade", "12", "science", "test"]
        );
    }

    #[test]
    fn test_blank_input() {
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("").is_empty());
        assert!(tokenize("-_- \t").is_empty());
    }

    #[test]
    fn test_case_and_punctuation_preserved() {
        assert_eq!(
            tokenize("  Grade 12 (Science) "),
            vec!["Grade", "12", "(Science)"]
        );
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(SeparatorTokenizer::new().name(), "separator");
    }
}
