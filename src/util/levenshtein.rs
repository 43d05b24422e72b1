//! Levenshtein edit distance.
//!
//! Insertions, deletions and substitutions each cost 1. Distances are
//! measured in characters, not bytes. Comparison is case-sensitive; callers
//! lower-case both sides first.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings using the full
/// `(m + 1) x (n + 1)` dynamic-programming table.
///
/// ```
/// use querywise::util::levenshtein::levenshtein_distance;
///
/// assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
/// assert_eq!(levenshtein_distance("", "abc"), 3);
/// ```
#[allow(clippy::needless_range_loop)]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let substitution = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            table[i][j] = min(
                min(table[i - 1][j] + 1, table[i][j - 1] + 1),
                table[i - 1][j - 1] + substitution,
            );
        }
    }

    table[m][n]
}

/// Find the candidate closest to `word` within `max_distance` edits.
///
/// Candidates are visited in iteration order and only a strictly smaller
/// distance replaces the current best, so on ties the first candidate wins.
pub fn closest_within<'a, I>(word: &str, candidates: I, max_distance: usize) -> Option<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let word_len = word.chars().count();
    let mut best: Option<(&'a str, usize)> = None;

    for candidate in candidates {
        // The distance is at least the length difference.
        if word_len.abs_diff(candidate.chars().count()) > max_distance {
            continue;
        }
        let distance = levenshtein_distance(word, candidate);
        if distance > max_distance {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
        if distance == 0 {
            break;
        }
    }

    best
}
