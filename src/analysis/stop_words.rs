//! Stop-word handling.
//!
//! The default English list is always present; configured words are added
//! on top of it, never in place of it.

use ahash::AHashSet;

const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "in", "is", "it",
    "its", "of", "on", "or", "that", "the", "to", "was", "were", "will", "with", "this", "what",
    "which", "who", "how", "why", "when", "where", "do", "does", "i", "me", "my", "we", "you",
];

/// An immutable, case-insensitive set of stop words.
#[derive(Clone, Debug)]
pub struct StopWords {
    words: AHashSet<String>,
}

impl StopWords {
    /// The default English stop words.
    pub fn english() -> Self {
        StopWords {
            words: DEFAULT_ENGLISH_STOP_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }

    /// The default English stop words plus `extra`.
    pub fn english_with<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stop_words = Self::english();
        stop_words.words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        stop_words
    }

    /// Check if a word is a stop word, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}
