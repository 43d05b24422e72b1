//! Query quality evaluation: the pass/fail gate and the 0-100 score.

pub mod gate;
pub mod score;

pub use gate::*;
pub use score::*;

use serde::{Deserialize, Serialize};

use crate::document::SearchResult;

/// Match statistics of a query against its top hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetrics {
    /// Total hit count reported by the backend.
    pub results_found: u64,
    /// Matched query tokens over total query tokens, within [0, 1].
    pub token_match_ratio: f64,
    /// Number of fields of the top hit that matched.
    pub fields_matched: u64,
}

impl MatchMetrics {
    /// Compute metrics from the top hit of `result` for a query of
    /// `total_tokens` tokens. A result without hits yields zero ratio and
    /// zero fields.
    pub fn from_result(result: &SearchResult, total_tokens: usize) -> Self {
        let info = result
            .top_hit()
            .and_then(|hit| hit.text_match_info)
            .unwrap_or_default();

        let token_match_ratio = if total_tokens > 0 {
            (info.tokens_matched as f64 / total_tokens as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };

        MatchMetrics {
            results_found: result.found,
            token_match_ratio,
            fields_matched: info.fields_matched,
        }
    }
}

/// Quality verdict for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryQualityMetrics {
    pub original_query: String,
    pub is_quality_query: bool,
    /// 0 unless every gate passed.
    pub quality_score: u8,
    pub metrics: MatchMetrics,
    /// Empty exactly when `is_quality_query` is true.
    pub failure_reasons: Vec<String>,
}

impl QueryQualityMetrics {
    /// The verdict used when analysis itself failed.
    pub fn degraded(query: &str) -> Self {
        QueryQualityMetrics {
            original_query: query.to_string(),
            is_quality_query: false,
            quality_score: 0,
            metrics: MatchMetrics::default(),
            failure_reasons: vec![FailureReason::InternalError.to_string()],
        }
    }
}
