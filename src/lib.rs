//! # Querywise
//!
//! Search query quality scoring and query reconstruction for Rust.
//!
//! Given the raw query a user typed and the result a search backend returned
//! for it, Querywise decides whether the query is worth counting for
//! suggestions and autocomplete, scores it, and rebuilds a cleaned-up version
//! of it from the top hit's highlights.
//!
//! ## Features
//!
//! - Threshold quality gate with human-readable failure reasons
//! - Weighted 0-100 quality score
//! - Entity expansion and typo correction from highlights
//! - Edit-distance correction against the top document's vocabulary
//! - Per-collection field profiles
//! - Parallel batch analysis and popularity tracking

pub mod analysis;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod quality;
pub mod reconstruct;
pub mod schema;
pub mod tracking;
pub mod util;

pub mod prelude {
    pub use crate::analyzer::{AnalysisOutcome, AnalysisRequest, Candidate, QueryQualityAnalyzer};
    pub use crate::config::{AnalyzerConfig, AnalyzerOptions};
    pub use crate::document::{Document, HighlightSnippet, SearchHit, SearchResult};
    pub use crate::error::{QuerywiseError, Result};
    pub use crate::quality::QueryQualityMetrics;
    pub use crate::schema::{CollectionKind, CollectionProfile};
    pub use crate::tracking::{MemorySink, PopularitySink};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
