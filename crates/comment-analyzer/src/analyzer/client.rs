//! Comment analyzer API client.
//!
//! This module provides a trait-based HTTP client for the Perspective
//! comment analyzer API. The trait abstraction enables:
//!
//! - Easy mocking in unit tests
//! - HTTP-level testing with `MockHttpServer` in integration tests
//! - Pointing the client at a different deployment via the base URL
//!
//! # Example
//!
//! ```ignore
//! use comment_analyzer::analyzer::{
//!     AttributeParameters, Comment, CommentAnalyzer, HttpCommentAnalyzer, RequestConfig,
//! };
//!
//! let client = HttpCommentAnalyzer::new("my-api-key");
//! let mut request = RequestConfig::new();
//! request
//!     .comment(Comment::plain_text("hello"))
//!     .languages(["en"])
//!     .requested_attributes([("TOXICITY", AttributeParameters::default())]);
//!
//! let result = client.analyze(&request).await?;
//! println!("toxicity: {:?}", result.summary_score("TOXICITY"));
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use thiserror::Error;

use super::request::{Operation, RequestConfig};
use super::types::{AnalysisResult, ApiErrorEnvelope};
use crate::config::ApiConfig;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://commentanalyzer.googleapis.com/v1alpha1";

/// Per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when calling the comment analyzer API.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// API returned a structured `error` payload
    #[error("API error {code}: {message}")]
    Api { message: String, code: i64 },

    /// Transport failure or an error response without a structured payload.
    /// The underlying reqwest error is passed through untouched.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Request body could not be encoded
    #[error("failed to encode request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AnalyzerError {
    /// Create an API error from a message and code.
    pub fn api(message: impl Into<String>, code: i64) -> Self {
        Self::Api {
            message: message.into(),
            code,
        }
    }

    /// Numeric code of a structured API error.
    #[must_use]
    pub const fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Trait for comment analyzer operations.
///
/// Use `HttpCommentAnalyzer` for real HTTP calls, or
/// `mock::MockCommentAnalyzer` in tests.
#[async_trait]
pub trait CommentAnalyzer: Send + Sync {
    /// Score a comment for the requested attributes.
    async fn analyze(&self, request: &RequestConfig) -> Result<AnalysisResult, AnalyzerError>;

    /// Submit suggested scores for a comment.
    async fn suggest_score(
        &self,
        request: &RequestConfig,
    ) -> Result<AnalysisResult, AnalyzerError>;
}

/// HTTP-based implementation of `CommentAnalyzer`.
///
/// Holds no request state; every call borrows the caller's `RequestConfig`.
pub struct HttpCommentAnalyzer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl fmt::Debug for HttpCommentAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCommentAnalyzer")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl HttpCommentAnalyzer {
    /// Create a client for the production API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key)
    }

    /// Create a client with a custom `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client from loaded configuration.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.key.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout())
    }

    /// Override the API root (e.g., to target a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full endpoint URL for `operation`, without the key parameter.
    #[must_use]
    pub fn endpoint(&self, operation: Operation) -> String {
        format!(
            "{}/comments:{}",
            self.base_url.trim_end_matches('/'),
            operation.method()
        )
    }

    /// Send one request for `operation` built from the fields set in `request`.
    ///
    /// # Errors
    /// Returns `AnalyzerError::Api` when the API answers with a structured
    /// error, and `AnalyzerError::Request` for any other failure.
    pub async fn dispatch(
        &self,
        operation: Operation,
        request: &RequestConfig,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let body = request.body_for(operation)?;
        let url = self.endpoint(operation);

        tracing::debug!(
            %operation,
            fields = ?body.keys().collect::<Vec<_>>(),
            "sending comment analyzer request"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header(ACCEPT, "application/json")
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        let status_error = response.error_for_status_ref().err();
        if let Some(status_error) = status_error {
            let Ok(bytes) = response.bytes().await else {
                return Err(AnalyzerError::Request(status_error));
            };

            return Err(match serde_json::from_slice::<ApiErrorEnvelope>(&bytes) {
                Ok(envelope) => {
                    tracing::warn!(
                        %operation,
                        code = envelope.error.code,
                        message = %envelope.error.message,
                        "comment analyzer returned an API error"
                    );
                    AnalyzerError::Api {
                        message: envelope.error.message,
                        code: envelope.error.code,
                    }
                }
                Err(_) => {
                    tracing::warn!(
                        %operation,
                        status = ?status_error.status(),
                        "comment analyzer request failed without an error payload"
                    );
                    AnalyzerError::Request(status_error)
                }
            });
        }

        let result: AnalysisResult = response.json().await?;
        Ok(result)
    }
}

#[async_trait]
impl CommentAnalyzer for HttpCommentAnalyzer {
    async fn analyze(&self, request: &RequestConfig) -> Result<AnalysisResult, AnalyzerError> {
        self.dispatch(Operation::Analyze, request).await
    }

    async fn suggest_score(
        &self,
        request: &RequestConfig,
    ) -> Result<AnalysisResult, AnalyzerError> {
        self.dispatch(Operation::SuggestScore, request).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{AnalysisResult, AnalyzerError, CommentAnalyzer, RequestConfig};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `CommentAnalyzer` for unit tests.
    ///
    /// Configure responses with `set_*_result` methods and verify
    /// calls with `analyze_calls()` and `suggest_score_calls()`.
    /// Unconfigured calls return an empty result object.
    pub struct MockCommentAnalyzer {
        analyze_result: Mutex<Option<Result<AnalysisResult, AnalyzerError>>>,
        suggest_score_result: Mutex<Option<Result<AnalysisResult, AnalyzerError>>>,
        analyze_calls: Mutex<Vec<RequestConfig>>,
        suggest_score_calls: Mutex<Vec<RequestConfig>>,
    }

    impl MockCommentAnalyzer {
        pub fn new() -> Self {
            Self {
                analyze_result: Mutex::new(None),
                suggest_score_result: Mutex::new(None),
                analyze_calls: Mutex::new(Vec::new()),
                suggest_score_calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `analyze` call.
        pub fn set_analyze_result(&self, result: Result<AnalysisResult, AnalyzerError>) {
            *self.analyze_result.lock().unwrap() = Some(result);
        }

        /// Set the result for the next `suggest_score` call.
        pub fn set_suggest_score_result(&self, result: Result<AnalysisResult, AnalyzerError>) {
            *self.suggest_score_result.lock().unwrap() = Some(result);
        }

        /// Snapshots of every config passed to `analyze`.
        pub fn analyze_calls(&self) -> Vec<RequestConfig> {
            self.analyze_calls.lock().unwrap().clone()
        }

        /// Snapshots of every config passed to `suggest_score`.
        pub fn suggest_score_calls(&self) -> Vec<RequestConfig> {
            self.suggest_score_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockCommentAnalyzer {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CommentAnalyzer for MockCommentAnalyzer {
        async fn analyze(&self, request: &RequestConfig) -> Result<AnalysisResult, AnalyzerError> {
            self.analyze_calls.lock().unwrap().push(request.clone());

            self.analyze_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(AnalysisResult::default()))
        }

        async fn suggest_score(
            &self,
            request: &RequestConfig,
        ) -> Result<AnalysisResult, AnalyzerError> {
            self.suggest_score_calls.lock().unwrap().push(request.clone());

            self.suggest_score_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(AnalysisResult::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_uses_method_segment() {
        let client = HttpCommentAnalyzer::new("key");
        assert_eq!(
            client.endpoint(Operation::Analyze),
            "https://commentanalyzer.googleapis.com/v1alpha1/comments:analyze"
        );
        assert_eq!(
            client.endpoint(Operation::SuggestScore),
            "https://commentanalyzer.googleapis.com/v1alpha1/comments:suggestscore"
        );
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = HttpCommentAnalyzer::new("key").with_base_url("http://localhost:9000/v1/");
        assert_eq!(
            client.endpoint(Operation::Analyze),
            "http://localhost:9000/v1/comments:analyze"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = HttpCommentAnalyzer::new("super-secret");
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn api_error_display_and_code() {
        let err = AnalyzerError::api("Comment too long", 400);
        assert_eq!(err.to_string(), "API error 400: Comment too long");
        assert_eq!(err.api_code(), Some(400));
    }

    #[tokio::test]
    async fn mock_records_config_snapshots() {
        use super::mock::MockCommentAnalyzer;
        use crate::analyzer::Comment;

        let mock = MockCommentAnalyzer::new();
        mock.set_analyze_result(Err(AnalyzerError::api("quota", 429)));

        let mut request = RequestConfig::new();
        request.comment(Comment::new("first"));
        let first = mock.analyze(&request).await;
        assert_eq!(first.unwrap_err().api_code(), Some(429));

        request.comment(Comment::new("second"));
        let second = mock.analyze(&request).await.unwrap();
        assert_eq!(second, AnalysisResult::default());

        let calls = mock.analyze_calls();
        assert_eq!(calls.len(), 2);
        assert_ne!(calls[0], calls[1]);
        assert!(mock.suggest_score_calls().is_empty());
    }
}
