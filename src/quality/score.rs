//! The bounded quality score.

use crate::config::ScoreWeights;

/// At most this many matched fields contribute to the score.
pub const MAX_SCORED_FIELDS: u64 = 3;

/// Combine match ratio, matched fields and result presence into a score in
/// `0..=100`.
pub fn quality_score(
    token_match_ratio: f64,
    fields_matched: u64,
    results_found: u64,
    weights: &ScoreWeights,
) -> u8 {
    let mut score = token_match_ratio * weights.token_ratio
        + fields_matched.min(MAX_SCORED_FIELDS) as f64 * weights.fields_matched;
    if results_found > 0 {
        score += weights.has_results;
    }

    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}
