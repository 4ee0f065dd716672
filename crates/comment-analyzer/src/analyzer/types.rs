//! Data types for comment analyzer requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The comment being scored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Comment text
    pub text: String,
    /// Text format (e.g., "PLAIN_TEXT", "HTML")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
}

impl Comment {
    /// Create a comment with no explicit text type.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_type: None,
        }
    }

    /// Create a comment tagged as `PLAIN_TEXT`.
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_type: Some("PLAIN_TEXT".to_string()),
        }
    }
}

/// Surrounding conversation the comment appeared in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Context {
    pub entries: Vec<ContextEntry>,
}

impl Context {
    pub fn new(entries: impl IntoIterator<Item = ContextEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

/// A single piece of context, such as a parent comment or article text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextEntry {
    pub text: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
}

impl ContextEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_type: None,
        }
    }
}

/// Per-attribute options for an `analyze` request. An empty value (`{}`)
/// requests the attribute with server defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeParameters {
    /// Score type (e.g., "PROBABILITY")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_type: Option<String>,
    /// Only return scores at or above this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f64>,
}

/// A score value as used by both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub value: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub score_type: Option<String>,
}

impl Score {
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            score_type: None,
        }
    }
}

/// Score for a character range of the comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpanScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    pub score: Score,
}

/// Suggested scores for one attribute in a `suggestscore` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_scores: Option<Vec<SpanScore>>,
}

impl AttributeScore {
    /// Suggest a summary score only.
    pub const fn summary(value: f64) -> Self {
        Self {
            summary_score: Some(Score::new(value)),
            span_scores: None,
        }
    }
}

/// Attribute name to requested parameters.
pub type RequestedAttributes = BTreeMap<String, AttributeParameters>;

/// Attribute name to suggested scores.
pub type AttributeScores = BTreeMap<String, AttributeScore>;

/// Decoded response body, passed through exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Value);

impl AnalysisResult {
    /// Borrow the raw JSON response.
    #[must_use]
    pub const fn as_json(&self) -> &Value {
        &self.0
    }

    /// Take the raw JSON response.
    #[must_use]
    pub fn into_json(self) -> Value {
        self.0
    }

    /// Look up `attributeScores.<attribute>.summaryScore.value`.
    #[must_use]
    pub fn summary_score(&self, attribute: &str) -> Option<f64> {
        self.0
            .get("attributeScores")?
            .get(attribute)?
            .get("summaryScore")?
            .get("value")?
            .as_f64()
    }

    /// Languages the API reports for the comment, if any.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        self.0
            .get("languages")
            .and_then(Value::as_array)
            .map(|langs| langs.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }
}

impl From<Value> for AnalysisResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// `{"error": {...}}` body returned by the API on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
    pub code: i64,
}
