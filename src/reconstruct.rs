//! Query reconstruction.
//!
//! Repairs a query using what the backend highlighted in its top hit:
//! partial tokens are expanded into entity values, misspelled tokens are
//! replaced with highlighted or nearby document words, and the result is
//! rebuilt as a clean query string.

pub mod canonical;
pub mod replacement;
pub mod tags;

pub use canonical::*;
pub use replacement::*;
pub use tags::*;

use log::trace;

use crate::config::AnalyzerConfig;
use crate::document::{Document, HighlightSnippet};
use crate::schema::CollectionProfile;

/// Rebuilds queries for one collection.
pub struct QueryReconstructor<'a> {
    config: &'a AnalyzerConfig,
    profile: &'a dyn CollectionProfile,
}

impl<'a> QueryReconstructor<'a> {
    pub fn new(config: &'a AnalyzerConfig, profile: &'a dyn CollectionProfile) -> Self {
        QueryReconstructor { config, profile }
    }

    /// Build the full replacement map for `query_tokens`: highlight-derived
    /// entries first, then edit-distance corrections for what is left.
    pub fn replacements(
        &self,
        query_tokens: &[String],
        highlights: &[HighlightSnippet],
        document: &Document,
    ) -> ReplacementMap {
        let stop_words = &self.config.stop_words;
        let min_length = self.config.min_query_length;

        let mut map =
            build_replacements(highlights, query_tokens, self.profile, stop_words, min_length);
        let vocabulary = canonical_words(document, self.profile, stop_words, min_length);
        let corrected = correct_from_vocabulary(query_tokens, &vocabulary, stop_words, &mut map);
        trace!(
            "{} replacements ({} from vocabulary of {} words)",
            map.len(),
            corrected,
            vocabulary.len()
        );

        map
    }

    /// Reconstruct `query_tokens` into a repaired query string.
    pub fn reconstruct(
        &self,
        query_tokens: &[String],
        highlights: &[HighlightSnippet],
        document: &Document,
    ) -> String {
        let map = self.replacements(query_tokens, highlights, document);
        rebuild(query_tokens, &map)
    }
}

/// Map every token through `replacements` and collapse adjacent duplicates.
///
/// Replacement values are split into words first. When two adjacent words
/// are equal ignoring case, one is kept: the replacement word if either of
/// them is one, otherwise the first.
pub fn rebuild(query_tokens: &[String], replacements: &ReplacementMap) -> String {
    let mut words: Vec<(&str, bool)> = Vec::new();

    for token in query_tokens {
        let pieces: Vec<(&str, bool)> = match replacements.get(&token.to_lowercase()) {
            Some(replacement) => replacement
                .value
                .split_whitespace()
                .map(|w| (w, true))
                .collect(),
            None => vec![(token.as_str(), false)],
        };

        for (word, replaced) in pieces {
            if word.is_empty() {
                continue;
            }
            if let Some(last) = words.last_mut()
                && last.0.to_lowercase() == word.to_lowercase()
            {
                if replaced && !last.1 {
                    *last = (word, replaced);
                }
                continue;
            }
            words.push((word, replaced));
        }
    }

    words
        .into_iter()
        .map(|(word, _)| word)
        .collect::<Vec<_>>()
        .join(" ")
}
