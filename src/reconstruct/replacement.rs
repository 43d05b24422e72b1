//! Token replacement map built from highlight snippets.

use ahash::AHashMap;
use log::trace;

use crate::analysis::markup::{marked_text, marked_word, strip_tags};
use crate::analysis::stop_words::StopWords;
use crate::analysis::tokenizer::tokenize;
use crate::document::HighlightSnippet;
use crate::schema::CollectionProfile;

/// Where a replacement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementKind {
    /// Whole value of an expandable field, e.g. `12` -> `Grade 12 (Science)`.
    EntityExpansion,
    /// Highlighted word of a regular field.
    TypoCorrection,
    /// Closest document word by edit distance.
    EditDistance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub value: String,
    pub kind: ReplacementKind,
}

/// Lower-cased query token -> replacement text.
///
/// Entity expansions are never overwritten by corrections.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMap {
    entries: AHashMap<String, Replacement>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entity expansion for `key`, replacing whatever was there.
    pub fn insert_entity(&mut self, key: String, value: String) {
        trace!("entity expansion {key:?} -> {value:?}");
        self.entries.insert(
            key,
            Replacement {
                value,
                kind: ReplacementKind::EntityExpansion,
            },
        );
    }

    /// Record a correction for `key` unless an entity expansion already
    /// claimed it. Returns whether the entry was stored.
    pub fn insert_correction(&mut self, key: String, value: String, kind: ReplacementKind) -> bool {
        if let Some(existing) = self.entries.get(&key)
            && existing.kind == ReplacementKind::EntityExpansion
        {
            return false;
        }
        trace!("correction {key:?} -> {value:?} ({kind:?})");
        self.entries.insert(key, Replacement { value, kind });
        true
    }

    pub fn get(&self, key: &str) -> Option<&Replacement> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the replacement map from the top hit's highlights.
///
/// For every snippet the triggering token is the marked text, or failing
/// that a matched token that occurs in the snippet. Its first token is the
/// key, aligned to the query token it stands for (see [`align_key`]).
pub fn build_replacements(
    highlights: &[HighlightSnippet],
    query_tokens: &[String],
    profile: &dyn CollectionProfile,
    stop_words: &StopWords,
    min_token_length: usize,
) -> ReplacementMap {
    let query_lower: Vec<String> = query_tokens.iter().map(|t| t.to_lowercase()).collect();
    let mut map = ReplacementMap::new();

    for highlight in highlights {
        let expandable = highlight
            .field
            .as_deref()
            .is_some_and(|field| profile.is_expandable(field));
        let matched_tokens = highlight.flattened_tokens();

        for snippet in highlight.snippet_list() {
            let clean = strip_tags(snippet);
            if clean.is_empty() {
                continue;
            }

            let trigger = match marked_text(snippet) {
                Some(mark) => Some(mark.to_lowercase()),
                None => {
                    let clean_lower = clean.to_lowercase();
                    matched_tokens
                        .iter()
                        .map(|t| t.to_lowercase())
                        .find(|t| !t.is_empty() && clean_lower.contains(t.as_str()))
                }
            };
            let Some(trigger) = trigger else {
                continue;
            };
            let Some(first) = tokenize(&trigger).into_iter().next() else {
                continue;
            };
            let key = align_key(first, &query_lower, stop_words, min_token_length);

            if expandable {
                map.insert_entity(key, clean);
            } else {
                let value = marked_word(snippet).unwrap_or(clean);
                map.insert_correction(key, value, ReplacementKind::TypoCorrection);
            }
        }
    }

    map
}

/// Map a highlight's trigger token onto the query token it matched.
///
/// An identical query token wins. Otherwise the first query token that is a
/// prefix of the trigger, or has the trigger as a prefix, is used (the
/// backend matches `12th` against `<mark>12</mark>`). Stop words and tokens
/// shorter than `min_token_length` never take part in prefix alignment.
pub fn align_key(
    trigger: String,
    query_lower: &[String],
    stop_words: &StopWords,
    min_token_length: usize,
) -> String {
    if query_lower.iter().any(|t| *t == trigger) {
        return trigger;
    }
    if trigger.chars().count() < min_token_length {
        return trigger;
    }

    query_lower
        .iter()
        .filter(|t| t.chars().count() >= min_token_length && !stop_words.contains(t))
        .find(|t| t.starts_with(trigger.as_str()) || trigger.starts_with(t.as_str()))
        .cloned()
        .unwrap_or(trigger)
}
