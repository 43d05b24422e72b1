//! Analyzer configuration.
//!
//! [`AnalyzerOptions`] is the user-facing, fully optional form (as read from
//! JSON). [`AnalyzerConfig`] is the resolved form an analyzer holds: defaults
//! applied, regexes compiled, stop words unioned. It never changes after it
//! is built.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::stop_words::StopWords;
use crate::error::{QuerywiseError, Result};

/// Rejects queries made only of non-alphanumeric characters.
pub const DEFAULT_EXCLUDE_PATTERN: &str = r"^[^a-zA-Z0-9]+$";

/// Key of the fallback entry in the field-weight map.
pub const DEFAULT_WEIGHT_KEY: &str = "default";

/// Weights of the three quality-score components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    /// Multiplier for the token match ratio.
    pub token_ratio: f64,
    /// Points per matched field (at most three fields count).
    pub fields_matched: f64,
    /// Flat bonus when the backend found anything.
    pub has_results: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            token_ratio: 50.0,
            fields_matched: 10.0,
            has_results: 20.0,
        }
    }
}

/// Partial score weights; missing entries keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreWeightOverrides {
    pub token_ratio: Option<f64>,
    pub fields_matched: Option<f64>,
    pub has_results: Option<f64>,
}

impl ScoreWeightOverrides {
    fn apply(&self, base: ScoreWeights) -> ScoreWeights {
        ScoreWeights {
            token_ratio: self.token_ratio.unwrap_or(base.token_ratio),
            fields_matched: self.fields_matched.unwrap_or(base.fields_matched),
            has_results: self.has_results.unwrap_or(base.has_results),
        }
    }
}

/// User-supplied analyzer options. Every field is optional.
///
/// ```
/// use querywise::config::AnalyzerOptions;
///
/// let options = AnalyzerOptions::from_json_str(r#"{"minQueryLength": 3, "stopWords": ["chapter"]}"#).unwrap();
/// assert_eq!(options.min_query_length, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerOptions {
    /// Minimum trimmed query length, in characters (default 2).
    pub min_query_length: Option<usize>,
    /// Minimum hit count reported by the backend (default 1).
    pub min_results_found: Option<u64>,
    /// Minimum matched-token ratio, within [0, 1] (default 0.5).
    pub min_token_match_ratio: Option<f64>,
    /// Regexes rejecting a query outright. Replaces the default list.
    pub exclude_patterns: Option<Vec<String>>,
    /// Extra stop words, unioned with the default English list.
    pub stop_words: Option<Vec<String>>,
    /// Per-field weights, merged over the defaults.
    pub field_weights: Option<BTreeMap<String, f64>>,
    /// Score component weights, merged over the defaults.
    pub quality_score_weights: Option<ScoreWeightOverrides>,
}

impl AnalyzerOptions {
    /// Create empty options (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Set the minimum query length.
    pub fn min_query_length(mut self, length: usize) -> Self {
        self.min_query_length = Some(length);
        self
    }

    /// Set the minimum number of results.
    pub fn min_results_found(mut self, found: u64) -> Self {
        self.min_results_found = Some(found);
        self
    }

    /// Set the minimum token match ratio.
    pub fn min_token_match_ratio(mut self, ratio: f64) -> Self {
        self.min_token_match_ratio = Some(ratio);
        self
    }

    /// Replace the exclude patterns.
    pub fn exclude_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Add stop words on top of the defaults.
    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Set the weight of a single field.
    pub fn field_weight<S: Into<String>>(mut self, field: S, weight: f64) -> Self {
        self.field_weights
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), weight);
        self
    }

    /// Override score weights.
    pub fn quality_score_weights(mut self, overrides: ScoreWeightOverrides) -> Self {
        self.quality_score_weights = Some(overrides);
        self
    }
}

/// The resolved, immutable configuration an analyzer runs with.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub min_query_length: usize,
    pub min_results_found: u64,
    pub min_token_match_ratio: f64,
    pub exclude_patterns: Vec<Regex>,
    pub stop_words: StopWords,
    pub field_weights: BTreeMap<String, f64>,
    pub score_weights: ScoreWeights,
}

impl AnalyzerConfig {
    /// Resolve `options` against the defaults.
    ///
    /// Fails on an invalid exclude regex or a ratio outside [0, 1].
    pub fn from_options(options: &AnalyzerOptions) -> Result<Self> {
        let min_token_match_ratio = options.min_token_match_ratio.unwrap_or(0.5);
        if !(0.0..=1.0).contains(&min_token_match_ratio) {
            return Err(QuerywiseError::config(format!(
                "minTokenMatchRatio must be within [0, 1], got {min_token_match_ratio}"
            )));
        }

        let patterns: Vec<&str> = match &options.exclude_patterns {
            Some(patterns) => patterns.iter().map(String::as_str).collect(),
            None => vec![DEFAULT_EXCLUDE_PATTERN],
        };
        let exclude_patterns = patterns
            .into_iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    QuerywiseError::config(format!("Invalid exclude pattern '{pattern}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let stop_words = match &options.stop_words {
            Some(words) => StopWords::english_with(words),
            None => StopWords::english(),
        };

        let mut field_weights = default_field_weights();
        if let Some(overrides) = &options.field_weights {
            field_weights.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
        }

        let score_weights = options
            .quality_score_weights
            .as_ref()
            .map(|o| o.apply(ScoreWeights::default()))
            .unwrap_or_default();

        Ok(AnalyzerConfig {
            min_query_length: options.min_query_length.unwrap_or(2),
            min_results_found: options.min_results_found.unwrap_or(1),
            min_token_match_ratio,
            exclude_patterns,
            stop_words,
            field_weights,
            score_weights,
        })
    }

    /// Check whether any exclude pattern matches `query`.
    pub fn is_excluded(&self, query: &str) -> bool {
        self.exclude_patterns.iter().any(|re| re.is_match(query))
    }

}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::from_options(&AnalyzerOptions::default()).expect("default options are valid")
    }
}

fn default_field_weights() -> BTreeMap<String, f64> {
    [
        ("title", 10.0),
        ("grades", 10.0),
        ("description", 2.0),
        (DEFAULT_WEIGHT_KEY, 1.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
