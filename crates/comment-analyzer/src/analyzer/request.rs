//! Request configuration and per-operation field selection.
//!
//! [`RequestConfig`] accumulates optional fields through setters. At dispatch
//! time, [`RequestConfig::body_for`] keeps only the fields that were set *and*
//! belong to the [`Operation`] being called.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::types::{
    AttributeParameters, AttributeScore, AttributeScores, Comment, Context, RequestedAttributes,
};

/// A named request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Comment,
    Languages,
    Context,
    RequestedAttributes,
    SpanAnnotations,
    DoNotStore,
    ClientToken,
    SessionId,
    AttributeScores,
    CommunityId,
}

impl Field {
    pub const ALL: [Self; 10] = [
        Self::Comment,
        Self::Languages,
        Self::Context,
        Self::RequestedAttributes,
        Self::SpanAnnotations,
        Self::DoNotStore,
        Self::ClientToken,
        Self::SessionId,
        Self::AttributeScores,
        Self::CommunityId,
    ];

    /// JSON key used in the request body.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Languages => "languages",
            Self::Context => "context",
            Self::RequestedAttributes => "requestedAttributes",
            Self::SpanAnnotations => "spanAnnotations",
            Self::DoNotStore => "doNotStore",
            Self::ClientToken => "clientToken",
            Self::SessionId => "sessionId",
            Self::AttributeScores => "attributeScores",
            Self::CommunityId => "communityId",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

const ANALYZE_FIELDS: &[Field] = &[
    Field::Comment,
    Field::Languages,
    Field::RequestedAttributes,
    Field::Context,
    Field::SpanAnnotations,
    Field::DoNotStore,
    Field::ClientToken,
    Field::SessionId,
];

const SUGGEST_SCORE_FIELDS: &[Field] = &[
    Field::Comment,
    Field::Context,
    Field::AttributeScores,
    Field::Languages,
    Field::CommunityId,
    Field::ClientToken,
];

/// A remote call supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Analyze,
    SuggestScore,
}

impl Operation {
    /// Method segment in `comments:{method}`.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::Analyze => "analyze",
            Self::SuggestScore => "suggestscore",
        }
    }

    /// Fields that participate in this operation's request body, in order.
    #[must_use]
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::Analyze => ANALYZE_FIELDS,
            Self::SuggestScore => SUGGEST_SCORE_FIELDS,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analyze => f.write_str("analyze"),
            Self::SuggestScore => f.write_str("suggestScore"),
        }
    }
}

/// Optional request fields, set individually before a call.
///
/// Setting a field again replaces the earlier value. There is no way to
/// unset a field; start from a fresh (or cloned) config instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    comment: Option<Comment>,
    languages: Option<Vec<String>>,
    context: Option<Context>,
    requested_attributes: Option<RequestedAttributes>,
    span_annotations: Option<bool>,
    do_not_store: Option<bool>,
    client_token: Option<String>,
    session_id: Option<String>,
    attribute_scores: Option<AttributeScores>,
    community_id: Option<String>,
}

impl RequestConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment(&mut self, comment: Comment) -> &mut Self {
        self.comment = Some(comment);
        self
    }

    pub fn languages<I, S>(&mut self, languages: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn context(&mut self, context: Context) -> &mut Self {
        self.context = Some(context);
        self
    }

    pub fn requested_attributes<I, K>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, AttributeParameters)>,
        K: Into<String>,
    {
        self.requested_attributes = Some(
            attributes
                .into_iter()
                .map(|(name, params)| (name.into(), params))
                .collect(),
        );
        self
    }

    pub fn span_annotations(&mut self, enabled: bool) -> &mut Self {
        self.span_annotations = Some(enabled);
        self
    }

    pub fn do_not_store(&mut self, do_not_store: bool) -> &mut Self {
        self.do_not_store = Some(do_not_store);
        self
    }

    pub fn client_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.client_token = Some(token.into());
        self
    }

    pub fn session_id(&mut self, session_id: impl Into<String>) -> &mut Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn attribute_scores<I, K>(&mut self, scores: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, AttributeScore)>,
        K: Into<String>,
    {
        self.attribute_scores = Some(
            scores
                .into_iter()
                .map(|(name, score)| (name.into(), score))
                .collect(),
        );
        self
    }

    pub fn community_id(&mut self, community_id: impl Into<String>) -> &mut Self {
        self.community_id = Some(community_id.into());
        self
    }

    /// Whether `field` has been set.
    #[must_use]
    pub const fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Comment => self.comment.is_some(),
            Field::Languages => self.languages.is_some(),
            Field::Context => self.context.is_some(),
            Field::RequestedAttributes => self.requested_attributes.is_some(),
            Field::SpanAnnotations => self.span_annotations.is_some(),
            Field::DoNotStore => self.do_not_store.is_some(),
            Field::ClientToken => self.client_token.is_some(),
            Field::SessionId => self.session_id.is_some(),
            Field::AttributeScores => self.attribute_scores.is_some(),
            Field::CommunityId => self.community_id.is_some(),
        }
    }

    /// All fields set so far, regardless of operation.
    pub fn set_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|field| self.is_set(*field))
    }

    fn value_of(&self, field: Field) -> Result<Option<Value>, serde_json::Error> {
        match field {
            Field::Comment => encode(self.comment.as_ref()),
            Field::Languages => encode(self.languages.as_ref()),
            Field::Context => encode(self.context.as_ref()),
            Field::RequestedAttributes => encode(self.requested_attributes.as_ref()),
            Field::SpanAnnotations => encode(self.span_annotations.as_ref()),
            Field::DoNotStore => encode(self.do_not_store.as_ref()),
            Field::ClientToken => encode(self.client_token.as_ref()),
            Field::SessionId => encode(self.session_id.as_ref()),
            Field::AttributeScores => encode(self.attribute_scores.as_ref()),
            Field::CommunityId => encode(self.community_id.as_ref()),
        }
    }

    /// Build the JSON body for `operation` from the fields that are set.
    ///
    /// # Errors
    /// Returns an error if a field value cannot be encoded as JSON.
    pub fn body_for(&self, operation: Operation) -> Result<Map<String, Value>, serde_json::Error> {
        let mut body = Map::new();
        for &field in operation.fields() {
            if let Some(value) = self.value_of(field)? {
                body.insert(field.key().to_string(), value);
            }
        }
        Ok(body)
    }
}

fn encode<T: Serialize>(value: Option<&T>) -> Result<Option<Value>, serde_json::Error> {
    value.map(serde_json::to_value).transpose()
}
