//! Pass/fail thresholds deciding whether a query is worth learning from.
//!
//! Every check runs; a query collects one reason per failed check.

use std::fmt;

use crate::config::AnalyzerConfig;
use crate::quality::MatchMetrics;

/// Why a query was not considered a quality query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureReason {
    QueryTooShort,
    NoResults,
    /// Carries the observed token match ratio.
    LowMatchRatio(f64),
    ExcludedPattern,
    InternalError,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::QueryTooShort => write!(f, "Query too short"),
            FailureReason::NoResults => write!(f, "No results found"),
            FailureReason::LowMatchRatio(ratio) => {
                write!(f, "Low match ratio: {:.0}%", ratio * 100.0)
            }
            FailureReason::ExcludedPattern => write!(f, "Excluded pattern match"),
            FailureReason::InternalError => write!(f, "Internal Analytics Error"),
        }
    }
}

/// Result of running the gate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GateOutcome {
    pub reasons: Vec<FailureReason>,
}

impl GateOutcome {
    /// True when no check failed.
    pub fn passed(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Reasons rendered as display strings.
    pub fn reason_strings(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Run every quality check against an already trimmed query.
pub fn evaluate(query: &str, metrics: &MatchMetrics, config: &AnalyzerConfig) -> GateOutcome {
    let mut reasons = Vec::new();

    if query.chars().count() < config.min_query_length {
        reasons.push(FailureReason::QueryTooShort);
    }
    if metrics.results_found < config.min_results_found {
        reasons.push(FailureReason::NoResults);
    }
    if metrics.token_match_ratio < config.min_token_match_ratio {
        reasons.push(FailureReason::LowMatchRatio(metrics.token_match_ratio));
    }
    if config.is_excluded(query) {
        reasons.push(FailureReason::ExcludedPattern);
    }

    GateOutcome { reasons }
}
