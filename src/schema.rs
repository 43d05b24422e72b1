//! Collection profiles.
//!
//! A profile answers configuration questions about one search collection:
//! which fields exist, how they are weighted, which ones hold entity values
//! that may replace a query token outright, and which ones feed the
//! typo-correction vocabulary.

use std::collections::BTreeMap;
use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{AnalyzerConfig, DEFAULT_WEIGHT_KEY};

/// Capability interface implemented per collection type.
pub trait CollectionProfile: Send + Sync + fmt::Debug {
    /// Collection name, for logs.
    fn name(&self) -> &str;

    /// Whether the collection knows about `field`.
    fn supports(&self, field: &str) -> bool;

    /// Ranking weight of `field`.
    fn weight_of(&self, field: &str) -> f64;

    /// Whether a highlight on `field` expands the query token to the whole
    /// field value.
    fn is_expandable(&self, field: &str) -> bool;

    /// Fields scanned for canonical words, in scan order.
    fn scanned_fields(&self) -> &[String];

    /// Fields the backend searches, in priority order.
    fn searchable_fields(&self) -> &[String];

    /// `query_by` / `query_by_weights` parameters for the backend.
    fn search_parameters(&self) -> SearchParameters {
        let fields = self.searchable_fields();
        SearchParameters {
            query_by: fields.join(","),
            query_by_weights: fields
                .iter()
                .map(|f| self.weight_of(f).to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Backend search parameters derived from a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub query_by: String,
    pub query_by_weights: String,
}

/// Which built-in profile to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Books, topics and notes.
    #[default]
    Content,
    /// Q&A threads.
    Questions,
}

/// Table-driven [`CollectionProfile`].
#[derive(Debug, Clone)]
pub struct CollectionSchema {
    name: String,
    searchable: Vec<String>,
    expandable: AHashSet<String>,
    scanned: Vec<String>,
    weights: BTreeMap<String, f64>,
}

impl CollectionSchema {
    /// Create a schema from field lists, taking weights from `config`.
    pub fn new(
        name: &str,
        searchable: &[&str],
        expandable: &[&str],
        scanned: &[&str],
        config: &AnalyzerConfig,
    ) -> Self {
        CollectionSchema {
            name: name.to_string(),
            searchable: searchable.iter().map(|f| f.to_string()).collect(),
            expandable: expandable.iter().map(|f| f.to_string()).collect(),
            scanned: scanned.iter().map(|f| f.to_string()).collect(),
            weights: config.field_weights.clone(),
        }
    }

    /// Books, topics and notes.
    pub fn content(config: &AnalyzerConfig) -> Self {
        Self::new(
            "content",
            &["title", "description", "content", "grades", "author", "category", "tags"],
            &["grades", "author", "category", "tags", "slug", "id"],
            &["title", "description", "content", "grades"],
            config,
        )
    }

    /// Questions and answers.
    pub fn questions(config: &AnalyzerConfig) -> Self {
        Self::new(
            "questions",
            &["title", "content", "grades", "tags", "category"],
            &["grades", "category", "tags", "slug", "id"],
            &["title", "content", "grades"],
            config,
        )
    }

    /// Built-in profile for `kind`.
    pub fn for_kind(kind: CollectionKind, config: &AnalyzerConfig) -> Self {
        match kind {
            CollectionKind::Content => Self::content(config),
            CollectionKind::Questions => Self::questions(config),
        }
    }
}

impl CollectionProfile for CollectionSchema {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, field: &str) -> bool {
        self.searchable.iter().any(|f| f == field)
            || self.scanned.iter().any(|f| f == field)
            || self.expandable.contains(field)
    }

    fn weight_of(&self, field: &str) -> f64 {
        self.weights
            .get(field)
            .or_else(|| self.weights.get(DEFAULT_WEIGHT_KEY))
            .copied()
            .unwrap_or(1.0)
    }

    fn is_expandable(&self, field: &str) -> bool {
        self.expandable.contains(field)
    }

    fn scanned_fields(&self) -> &[String] {
        &self.scanned
    }

    fn searchable_fields(&self) -> &[String] {
        &self.searchable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerOptions;

    #[test]
    fn test_content_profile() {
        let schema = CollectionSchema::content(&AnalyzerConfig::default());
        assert_eq!(schema.name(), "content");
        assert!(schema.supports("title"));
        assert!(schema.supports("slug"));
        assert!(!schema.supports("answers"));
        assert!(schema.is_expandable("grades"));
        assert!(schema.is_expandable("author"));
        assert!(!schema.is_expandable("title"));
        assert_eq!(
            schema.scanned_fields(),
            &["title", "description", "content", "grades"]
        );
    }

    #[test]
    fn test_questions_profile() {
        let schema = CollectionSchema::questions(&AnalyzerConfig::default());
        assert!(!schema.supports("description"));
        assert!(!schema.is_expandable("author"));
        assert!(schema.is_expandable("tags"));
    }

    #[test]
    fn test_weights() {
        let config =
            AnalyzerConfig::from_options(&AnalyzerOptions::new().field_weight("default", 0.5))
                .unwrap();
        let schema = CollectionSchema::content(&config);
        assert_eq!(schema.weight_of("title"), 10.0);
        assert_eq!(schema.weight_of("description"), 2.0);
        assert_eq!(schema.weight_of("tags"), 0.5);
    }

    #[test]
    fn test_search_parameters() {
        let schema = CollectionSchema::questions(&AnalyzerConfig::default());
        let params = schema.search_parameters();
        assert_eq!(params.query_by, "title,content,grades,tags,category");
        assert_eq!(params.query_by_weights, "10,1,10,1,1");
    }

    #[test]
    fn test_for_kind() {
        let config = AnalyzerConfig::default();
        assert_eq!(
            CollectionSchema::for_kind(CollectionKind::Questions, &config).name(),
            "questions"
        );
        assert_eq!(
            CollectionSchema::for_kind(CollectionKind::default(), &config).name(),
            "content"
        );
    }
}
