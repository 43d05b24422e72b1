//! The query quality analyzer.
//!
//! [`QueryQualityAnalyzer`] ties the pipeline together: tokenize, gate,
//! score, reconstruct, extract tags, and assemble the list of queries worth
//! tracking. One analyzer is built per collection and shared freely; it holds
//! configuration only.
//!
//! # Examples
//!
//! ```
//! use querywise::analyzer::QueryQualityAnalyzer;
//! use querywise::config::AnalyzerOptions;
//! use serde_json::json;
//!
//! let analyzer = QueryQualityAnalyzer::new(&AnalyzerOptions::default()).unwrap();
//! let result = json!({
//!     "found": 1,
//!     "hits": [{
//!         "document": {"type": "book", "title": "Mathematics"},
//!         "text_match_info": {"fields_matched": 1, "tokens_matched": 1}
//!     }]
//! });
//!
//! let outcome = analyzer.safe_analyze_json("Mathematics", &result);
//! assert!(outcome.metrics.is_quality_query);
//! assert_eq!(outcome.queries_to_track[0].query, "mathematics");
//! ```

use std::sync::Arc;

use ahash::AHashSet;
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::tokenizer::tokenize;
use crate::config::{AnalyzerConfig, AnalyzerOptions};
use crate::document::SearchResult;
use crate::error::{QuerywiseError, Result};
use crate::quality::{MatchMetrics, QueryQualityMetrics, evaluate, quality_score};
use crate::reconstruct::{QueryReconstructor, extract_tags};
use crate::schema::{CollectionKind, CollectionProfile, CollectionSchema};

/// A query to report to the popularity tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Lower-cased query text.
    pub query: String,
    /// `type` of the top hit's document, if there was a hit.
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
}

/// Everything `analyze` produces for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub metrics: QueryQualityMetrics,
    /// Unique (ignoring case), lower-cased, highest priority first.
    pub queries_to_track: Vec<Candidate>,
}

impl AnalysisOutcome {
    /// Outcome reported when analysis failed.
    pub fn degraded(query: &str) -> Self {
        let trimmed = query.trim();
        let query = if trimmed.is_empty() { query } else { trimmed };
        AnalysisOutcome {
            metrics: QueryQualityMetrics::degraded(query),
            queries_to_track: vec![Candidate {
                query: query.to_lowercase(),
                doc_type: None,
            }],
        }
    }

    /// Whether the candidates should be forwarded to the tracker.
    pub fn should_track(&self) -> bool {
        self.metrics.is_quality_query && !self.queries_to_track.is_empty()
    }
}

/// One `(query, result)` pair, as found in search logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub query: String,
    pub result: SearchResult,
}

/// Scores search queries and reconstructs repaired versions of them.
#[derive(Debug, Clone)]
pub struct QueryQualityAnalyzer {
    config: Arc<AnalyzerConfig>,
    profile: Arc<dyn CollectionProfile>,
}

impl QueryQualityAnalyzer {
    /// Create an analyzer for the content collection.
    ///
    /// Fails when `options` are invalid.
    pub fn new(options: &AnalyzerOptions) -> Result<Self> {
        Self::for_collection(options, CollectionKind::Content)
    }

    /// Create an analyzer for one of the built-in collections.
    pub fn for_collection(options: &AnalyzerOptions, kind: CollectionKind) -> Result<Self> {
        let config = AnalyzerConfig::from_options(options)?;
        let profile = Arc::new(CollectionSchema::for_kind(kind, &config));
        Ok(Self::with_profile(config, profile))
    }

    /// Create an analyzer from a resolved config and a custom profile.
    pub fn with_profile(config: AnalyzerConfig, profile: Arc<dyn CollectionProfile>) -> Self {
        QueryQualityAnalyzer {
            config: Arc::new(config),
            profile,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn profile(&self) -> &dyn CollectionProfile {
        self.profile.as_ref()
    }

    /// Analyze `query` against the backend's `result`.
    pub fn analyze(&self, query: &str, result: &SearchResult) -> Result<AnalysisOutcome> {
        let query = query.trim();
        let tokens = tokenize(query);
        let metrics = MatchMetrics::from_result(result, tokens.len());
        let gate = evaluate(query, &metrics, &self.config);

        let top_hit = result.top_hit();
        let doc_type = top_hit
            .and_then(|hit| hit.document.doc_type())
            .map(str::to_string);

        if !gate.passed() {
            debug!(
                "[{}] {query:?} rejected: {:?}",
                self.profile.name(),
                gate.reason_strings()
            );
            return Ok(AnalysisOutcome {
                metrics: QueryQualityMetrics {
                    original_query: query.to_string(),
                    is_quality_query: false,
                    quality_score: 0,
                    metrics,
                    failure_reasons: gate.reason_strings(),
                },
                queries_to_track: to_candidates(vec![query.to_string()], doc_type),
            });
        }

        let score = quality_score(
            metrics.token_match_ratio,
            metrics.fields_matched,
            metrics.results_found,
            &self.config.score_weights,
        );

        let mut candidates = Vec::new();
        match top_hit.filter(|hit| !hit.highlights.is_empty()) {
            Some(hit) => {
                let reconstructor = QueryReconstructor::new(&self.config, self.profile.as_ref());
                let repaired = reconstructor.reconstruct(&tokens, &hit.highlights, &hit.document);
                let tags = extract_tags(
                    &hit.highlights,
                    self.profile.as_ref(),
                    self.config.min_query_length,
                );

                let repaired_lower = repaired.to_lowercase();
                let original_lower = query.to_lowercase();
                if !repaired.is_empty() {
                    candidates.push(repaired.clone());
                }
                for tag in tags {
                    let tag_lower = tag.to_lowercase();
                    if tag_lower != repaired_lower && tag_lower != original_lower {
                        candidates.push(tag);
                    }
                }
                if original_lower != repaired_lower {
                    candidates.push(query.to_string());
                }
                debug!(
                    "[{}] {query:?} repaired to {repaired:?}, score {score}",
                    self.profile.name()
                );
            }
            None => {
                debug!(
                    "[{}] {query:?} accepted without highlights, score {score}",
                    self.profile.name()
                );
                candidates.push(query.to_string());
            }
        }

        Ok(AnalysisOutcome {
            metrics: QueryQualityMetrics {
                original_query: query.to_string(),
                is_quality_query: true,
                quality_score: score,
                metrics,
                failure_reasons: Vec::new(),
            },
            queries_to_track: to_candidates(candidates, doc_type),
        })
    }

    /// Parse `result` from JSON and analyze it.
    pub fn analyze_json(&self, query: &str, result: &Value) -> Result<AnalysisOutcome> {
        let result = SearchResult::from_value(result)?;
        self.analyze(query, &result)
    }

    /// [`analyze`](Self::analyze), degrading to a non-quality outcome on
    /// error instead of failing.
    pub fn safe_analyze(&self, query: &str, result: &SearchResult) -> AnalysisOutcome {
        self.analyze(query, result)
            .unwrap_or_else(|e| self.degrade(query, e))
    }

    /// [`analyze_json`](Self::analyze_json), degrading on error.
    pub fn safe_analyze_json(&self, query: &str, result: &Value) -> AnalysisOutcome {
        self.analyze_json(query, result)
            .unwrap_or_else(|e| self.degrade(query, e))
    }

    /// Analyze many requests in parallel. Output order matches input order.
    pub fn analyze_batch(&self, requests: &[AnalysisRequest]) -> Vec<AnalysisOutcome> {
        requests
            .par_iter()
            .map(|request| self.safe_analyze(&request.query, &request.result))
            .collect()
    }

    fn degrade(&self, query: &str, error: QuerywiseError) -> AnalysisOutcome {
        warn!(
            "[{}] analysis of {:?} failed: {error}",
            self.profile.name(),
            query.trim()
        );
        AnalysisOutcome::degraded(query)
    }
}

/// Drop case-insensitive duplicates (first wins), lower-case, attach type.
fn to_candidates(queries: Vec<String>, doc_type: Option<String>) -> Vec<Candidate> {
    let mut seen = AHashSet::new();
    queries
        .into_iter()
        .map(|q| q.to_lowercase())
        .filter(|q| seen.insert(q.clone()))
        .map(|query| Candidate {
            query,
            doc_type: doc_type.clone(),
        })
        .collect()
}
