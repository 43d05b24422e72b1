//! Helpers for reading highlight markup produced by the search backend.
//!
//! Snippets look like `"<mark>Mat</mark>hematics"`: plain field text with the
//! matched portion wrapped in a highlight tag.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("tag pattern is valid");
    static ref MARK: Regex =
        Regex::new(r"(?is)<mark\b[^>]*>(.*?)</mark\s*>").expect("mark pattern is valid");
}

/// Remove every HTML-like tag and trim the result.
///
/// ```
/// use querywise::analysis::markup::strip_tags;
///
/// assert_eq!(strip_tags("<mark>12</mark>th Grade"), "12th Grade");
/// ```
pub fn strip_tags(snippet: &str) -> String {
    TAG.replace_all(snippet, "").trim().to_string()
}

/// Text inside the first `<mark>…</mark>` pair, without nested tags.
///
/// Returns `None` when the snippet has no mark or the mark is blank.
pub fn marked_text(snippet: &str) -> Option<String> {
    let captures = MARK.captures(snippet)?;
    let inner = strip_tags(captures.get(1)?.as_str());
    if inner.is_empty() { None } else { Some(inner) }
}

/// The whole word the first mark sits in.
///
/// Backends mark the matched prefix of a word (`<mark>Mat</mark>hematics`);
/// this extends the marked text over the alphanumeric characters directly
/// before and after it, giving `Mathematics`.
pub fn marked_word(snippet: &str) -> Option<String> {
    let captures = MARK.captures(snippet)?;
    let whole = captures.get(0)?;
    let inner = strip_tags(captures.get(1)?.as_str());
    if inner.is_empty() {
        return None;
    }

    let before = TAG.replace_all(&snippet[..whole.start()], "");
    let after = TAG.replace_all(&snippet[whole.end()..], "");

    let prefix_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(before.len());
    let suffix_end = after
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(after.len());

    Some(format!(
        "{}{}{}",
        &before[prefix_start..],
        inner,
        &after[..suffix_end]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<mark>Mat</mark>hematics"), "Mathematics");
        assert_eq!(strip_tags("  Grade <mark>12</mark> (Science) "), "Grade 12 (Science)");
        assert_eq!(strip_tags("plain"), "plain");
        assert_eq!(strip_tags("<b></b>"), "");
    }

    #[test]
    fn test_marked_text() {
        assert_eq!(marked_text("<mark>Mat</mark>hematics").as_deref(), Some("Mat"));
        assert_eq!(
            marked_text("a <mark>first</mark> and <mark>second</mark>").as_deref(),
            Some("first")
        );
        assert_eq!(marked_text("<MARK>Upper</MARK>").as_deref(), Some("Upper"));
        assert_eq!(marked_text("no highlight here"), None);
        assert_eq!(marked_text("<mark> </mark>"), None);
    }

    #[test]
    fn test_marked_word_extends_over_word() {
        assert_eq!(marked_word("<mark>Mat</mark>hematics").as_deref(), Some("Mathematics"));
        assert_eq!(marked_word("<mark>12</mark>th Grade").as_deref(), Some("12th"));
        assert_eq!(
            marked_word("Intro to al<mark>gebra</mark>, part 2").as_deref(),
            Some("algebra")
        );
        assert_eq!(marked_word("Grade <mark>12</mark> (Science)").as_deref(), Some("12"));
    }

    #[test]
    fn test_marked_word_without_mark() {
        assert_eq!(marked_word("Mathematics"), None);
    }
}
