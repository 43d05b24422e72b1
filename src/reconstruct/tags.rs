//! Entity tags from highlighted structured fields.

use crate::analysis::markup::strip_tags;
use crate::document::HighlightSnippet;
use crate::schema::CollectionProfile;

/// Clean values of highlights on expandable fields, in encounter order,
/// without duplicates and without values shorter than `min_length`.
pub fn extract_tags(
    highlights: &[HighlightSnippet],
    profile: &dyn CollectionProfile,
    min_length: usize,
) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for highlight in highlights {
        let expandable = highlight
            .field
            .as_deref()
            .is_some_and(|field| profile.is_expandable(field));
        if !expandable {
            continue;
        }
        for snippet in highlight.snippet_list() {
            let value = strip_tags(snippet);
            if value.chars().count() < min_length || tags.contains(&value) {
                continue;
            }
            tags.push(value);
        }
    }

    tags
}
