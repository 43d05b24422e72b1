//! Edit-distance fallback against the top hit's own vocabulary.

use std::collections::BTreeSet;

use log::debug;

use crate::analysis::stop_words::StopWords;
use crate::analysis::tokenizer::tokenize;
use crate::document::Document;
use crate::reconstruct::replacement::{ReplacementKind, ReplacementMap};
use crate::schema::CollectionProfile;
use crate::util::levenshtein::closest_within;

/// Tokens at least this long may be corrected by two edits, shorter ones by one.
pub const TWO_EDIT_MIN_LENGTH: usize = 6;

/// Edits allowed when correcting `token`.
pub fn allowed_distance(token: &str) -> usize {
    if token.chars().count() >= TWO_EDIT_MIN_LENGTH { 2 } else { 1 }
}

/// Collect the canonical words of `document`.
///
/// Scanned fields are tokenized, edge punctuation is trimmed, words are
/// lower-cased, and stop words or words shorter than `min_length` are
/// dropped. Fields that cannot be read as text are skipped. The set is
/// ordered, so lookups visit words lexicographically.
pub fn canonical_words(
    document: &Document,
    profile: &dyn CollectionProfile,
    stop_words: &StopWords,
    min_length: usize,
) -> BTreeSet<String> {
    let mut words = BTreeSet::new();

    for field in profile.scanned_fields() {
        if !profile.supports(field) {
            continue;
        }
        let text = match document.text(field) {
            Ok(Some(text)) => text,
            Ok(None) => continue,
            Err(e) => {
                debug!("skipping field in vocabulary scan: {e}");
                continue;
            }
        };
        for token in tokenize(&text) {
            let word = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if word.chars().count() < min_length || stop_words.contains(&word) {
                continue;
            }
            words.insert(word);
        }
    }

    words
}

/// Add edit-distance corrections for query tokens the highlights did not
/// cover. Returns the number of corrections added.
pub fn correct_from_vocabulary(
    query_tokens: &[String],
    vocabulary: &BTreeSet<String>,
    stop_words: &StopWords,
    replacements: &mut ReplacementMap,
) -> usize {
    if vocabulary.is_empty() {
        return 0;
    }

    let mut added = 0;
    for token in query_tokens {
        let lower = token.to_lowercase();
        if replacements.contains_key(&lower) || stop_words.contains(&lower) {
            continue;
        }
        let candidates = vocabulary.iter().map(String::as_str);
        if let Some((word, distance)) = closest_within(&lower, candidates, allowed_distance(&lower)) {
            // Already a document word.
            if distance == 0 {
                continue;
            }
            if replacements.insert_correction(lower, word.to_string(), ReplacementKind::EditDistance) {
                added += 1;
            }
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::schema::CollectionSchema;
    use serde_json::json;

    fn vocabulary(document: serde_json::Value) -> BTreeSet<String> {
        let config = AnalyzerConfig::default();
        let schema = CollectionSchema::content(&config);
        let document: Document = serde_json::from_value(document).unwrap();
        canonical_words(&document, &schema, &config.stop_words, 2)
    }

    #[test]
    fn test_allowed_distance() {
        assert_eq!(allowed_distance("algebr"), 2);
        assert_eq!(allowed_distance("mathematcs"), 2);
        assert_eq!(allowed_distance("physx"), 1);
    }

    #[test]
    fn test_canonical_words() {
        let words = vocabulary(json!({
            "title": "The Mathematics of Music",
            "description": "Rhythm, harmony-and_scales",
            "grades": ["Grade 12 (Science)", "A"],
            "author": "Euler"
        }));
        let expected: BTreeSet<String> = [
            "mathematics", "music", "rhythm", "harmony", "scales", "grade", "12", "science",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_canonical_words_skip_structured_fields() {
        let words = vocabulary(json!({
            "title": "Optics",
            "content": {"blocks": [{"text": "refraction"}]},
            "grades": [["Grade 9"]],
            "description": "Light and lenses"
        }));
        let expected: BTreeSet<String> = ["optics", "light", "lenses"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_typo_corrected_from_title() {
        let words = vocabulary(json!({"title": "Mathematics"}));
        let mut map = ReplacementMap::new();
        let stop_words = StopWords::english();
        let added =
            correct_from_vocabulary(&["mathematcs".to_string()], &words, &stop_words, &mut map);
        assert_eq!(added, 1);
        assert_eq!(map.get("mathematcs").unwrap().value, "mathematics");
    }

    #[test]
    fn test_short_tokens_allow_one_edit() {
        let words = vocabulary(json!({"title": "Physics"}));
        let mut map = ReplacementMap::new();
        let stop_words = StopWords::english();
        correct_from_vocabulary(
            &["phisycs".to_string(), "fysix".to_string()],
            &words,
            &stop_words,
            &mut map,
        );
        assert_eq!(map.get("phisycs").unwrap().value, "physics");
        assert!(!map.contains_key("fysix"));
    }

    #[test]
    fn test_skips_covered_and_stop_tokens() {
        let words = vocabulary(json!({"title": "Cells and tissues"}));
        let stop_words = StopWords::english();
        let mut map = ReplacementMap::new();
        map.insert_entity("cels".to_string(), "Cell Biology".to_string());

        correct_from_vocabulary(
            &["cels".to_string(), "and".to_string(), "tissue".to_string()],
            &words,
            &stop_words,
            &mut map,
        );
        assert_eq!(map.get("cels").unwrap().value, "Cell Biology");
        assert!(!map.contains_key("and"));
        assert_eq!(map.get("tissue").unwrap().value, "tissues");
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        let words: BTreeSet<String> = ["cart", "card"].into_iter().map(String::from).collect();
        let mut map = ReplacementMap::new();
        correct_from_vocabulary(&["carx".to_string()], &words, &StopWords::english(), &mut map);
        assert_eq!(map.get("carx").unwrap().value, "card");
    }
}
