//! Error types for querywise.
//!
//! All fallible operations return [`Result`], whose error side is
//! [`QuerywiseError`]. Configuration problems surface when an analyzer is
//! built; malformed search results surface from `analyze` and are absorbed by
//! the `safe_analyze` family.
//!
//! # Examples
//!
//! ```
//! use querywise::error::{QuerywiseError, Result};
//!
//! fn check_ratio(ratio: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&ratio) {
//!         return Err(QuerywiseError::config("ratio must be within [0, 1]"));
//!     }
//!     Ok(ratio)
//! }
//!
//! assert!(check_ratio(1.5).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for querywise operations.
#[derive(Error, Debug)]
pub enum QuerywiseError {
    /// I/O errors (options files, replay logs).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid analyzer configuration, reported at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A search result that does not have the expected shape.
    #[error("Malformed search result: {0}")]
    MalformedResult(String),

    /// A document field whose value cannot be read as text.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with [`QuerywiseError`].
pub type Result<T> = std::result::Result<T, QuerywiseError>;

impl QuerywiseError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        QuerywiseError::Config(msg.into())
    }

    /// Create a new malformed-result error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        QuerywiseError::MalformedResult(msg.into())
    }

    /// Create a new invalid-field error.
    pub fn invalid_field<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        QuerywiseError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        QuerywiseError::Other(msg.into())
    }
}
