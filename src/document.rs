//! Search results as returned by the full-text search backend.
//!
//! The backend speaks snake_case JSON (`text_match_info`, `matched_tokens`);
//! camelCase spellings are accepted as aliases.
//!
//! Documents stay schema-flexible on the wire but are read through typed
//! accessors: [`Document::text`] either yields text or reports which field
//! had an unusable shape.

use log::debug;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{QuerywiseError, Result};

/// Per-hit match statistics computed by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMatchInfo {
    #[serde(alias = "fieldsMatched", deserialize_with = "null_as_default")]
    pub fields_matched: u64,
    #[serde(alias = "tokensMatched", deserialize_with = "null_as_default")]
    pub tokens_matched: u64,
}

/// One entry of `matched_tokens`: a token, or a group of tokens for
/// array-valued fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenGroup {
    Token(String),
    Group(Vec<String>),
}

/// A highlighted fragment of one document field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSnippet {
    /// Name of the matched field.
    pub field: Option<String>,
    /// Tokens the backend matched in this field.
    #[serde(alias = "matchedTokens", deserialize_with = "null_as_default")]
    pub matched_tokens: Vec<TokenGroup>,
    /// Snippet for scalar fields.
    pub snippet: Option<String>,
    /// Snippets for array fields, one per matched element.
    pub snippets: Option<Vec<String>>,
}

impl HighlightSnippet {
    /// Create a highlight for `field` with a single snippet.
    pub fn new<F: Into<String>, S: Into<String>>(field: F, snippet: S) -> Self {
        HighlightSnippet {
            field: Some(field.into()),
            snippet: Some(snippet.into()),
            ..Default::default()
        }
    }

    /// Attach matched tokens.
    pub fn with_matched_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matched_tokens = tokens
            .into_iter()
            .map(|t| TokenGroup::Token(t.into()))
            .collect();
        self
    }

    /// `snippets` when present, otherwise `snippet` as a single entry.
    pub fn snippet_list(&self) -> Vec<&str> {
        match (&self.snippets, &self.snippet) {
            (Some(snippets), _) => snippets.iter().map(String::as_str).collect(),
            (None, Some(snippet)) => vec![snippet.as_str()],
            (None, None) => Vec::new(),
        }
    }

    /// Matched tokens with one level of grouping removed.
    pub fn flattened_tokens(&self) -> Vec<&str> {
        self.matched_tokens
            .iter()
            .flat_map(|group| match group {
                TokenGroup::Token(token) => vec![token.as_str()],
                TokenGroup::Group(tokens) => tokens.iter().map(String::as_str).collect(),
            })
            .collect()
    }
}

/// A document attached to a search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// The raw `type` string, if any.
    pub fn doc_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// Read `field` as text.
    ///
    /// Strings are returned as-is, numbers and booleans are stringified and
    /// arrays of scalars are joined with single spaces. Objects and nested
    /// arrays are rejected.
    pub fn text(&self, field: &str) -> Result<Option<String>> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    match scalar_text(item) {
                        Some(Some(text)) => parts.push(text),
                        Some(None) => {}
                        None => {
                            return Err(QuerywiseError::invalid_field(
                                field,
                                format!("array element is {}", json_kind(item)),
                            ));
                        }
                    }
                }
                Ok(Some(parts.join(" ")))
            }
            Some(value) => scalar_text(value).ok_or_else(|| {
                QuerywiseError::invalid_field(
                    field,
                    format!("expected text, found {}", json_kind(value)),
                )
            }),
        }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Document { fields }
    }
}

/// `None` for non-scalars, `Some(None)` for null.
fn scalar_text(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A single result row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    #[serde(deserialize_with = "null_as_default")]
    pub document: Document,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<HighlightSnippet>,
    #[serde(alias = "textMatchInfo")]
    pub text_match_info: Option<TextMatchInfo>,
}

/// The backend's answer to one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total hit count.
    pub found: u64,
    /// Ranked hits; only the first one is analyzed.
    #[serde(default, deserialize_with = "deserialize_hits")]
    pub hits: Vec<SearchHit>,
}

impl SearchResult {
    /// Parse a result from JSON, reporting shape problems as
    /// [`QuerywiseError::MalformedResult`].
    pub fn from_value(value: &Value) -> Result<Self> {
        SearchResult::deserialize(value).map_err(|e| QuerywiseError::malformed(e.to_string()))
    }

    /// The top-ranked hit.
    pub fn top_hit(&self) -> Option<&SearchHit> {
        self.hits.first()
    }
}

/// Read `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The top hit must parse; later hits that do not are dropped.
fn deserialize_hits<'de, D>(deserializer: D) -> std::result::Result<Vec<SearchHit>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Value> = null_as_default(deserializer)?;
    let mut raw = raw.into_iter();
    let Some(first) = raw.next() else {
        return Ok(Vec::new());
    };

    let mut hits = vec![SearchHit::deserialize(first).map_err(de::Error::custom)?];
    hits.extend(
        raw.enumerate()
            .filter_map(|(i, value)| match SearchHit::deserialize(value) {
                Ok(hit) => Some(hit),
                Err(e) => {
                    debug!("dropping hit {}: {e}", i + 1);
                    None
                }
            }),
    );
    Ok(hits)
}
