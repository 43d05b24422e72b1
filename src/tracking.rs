//! Forwarding tracked queries to a popularity sink.
//!
//! The sink decides how counts are stored; this module only decides when
//! candidates are sent.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;

use crate::analyzer::{AnalysisOutcome, Candidate};
use crate::error::Result;

/// Receives queries worth counting for suggestions and autocomplete.
pub trait PopularitySink: Send + Sync {
    fn record(&self, candidate: &Candidate) -> Result<()>;
}

/// Send every candidate of `outcome` to `sink` when the outcome is a quality
/// query. Returns how many candidates were recorded.
pub fn forward(outcome: &AnalysisOutcome, sink: &dyn PopularitySink) -> Result<usize> {
    if !outcome.should_track() {
        return Ok(0);
    }
    for candidate in &outcome.queries_to_track {
        sink.record(candidate)?;
    }
    Ok(outcome.queries_to_track.len())
}

/// One row of [`MemorySink::top`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackedQuery {
    pub query: String,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub count: u64,
}

/// In-process sink that counts `(query, type)` pairs.
#[derive(Debug, Default)]
pub struct MemorySink {
    counts: Mutex<HashMap<(String, Option<String>), u64>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `query` was recorded with `doc_type`.
    pub fn count(&self, query: &str, doc_type: Option<&str>) -> u64 {
        let key = (query.to_string(), doc_type.map(str::to_string));
        self.counts.lock().get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct `(query, type)` pairs.
    pub fn len(&self) -> usize {
        self.counts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.lock().is_empty()
    }

    /// The `n` most recorded pairs, by count descending then query.
    pub fn top(&self, n: usize) -> Vec<TrackedQuery> {
        let mut rows: Vec<TrackedQuery> = self
            .counts
            .lock()
            .iter()
            .map(|((query, doc_type), count)| TrackedQuery {
                query: query.clone(),
                doc_type: doc_type.clone(),
                count: *count,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.query.cmp(&b.query))
                .then_with(|| a.doc_type.cmp(&b.doc_type))
        });
        rows.truncate(n);
        rows
    }
}

impl PopularitySink for MemorySink {
    fn record(&self, candidate: &Candidate) -> Result<()> {
        let key = (candidate.query.clone(), candidate.doc_type.clone());
        *self.counts.lock().entry(key).or_insert(0) += 1;
        Ok(())
    }
}
