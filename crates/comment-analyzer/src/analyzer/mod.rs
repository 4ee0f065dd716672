//! Comment analyzer API module.
//!
//! Builds requests for the Perspective comment analyzer and sends them
//! over HTTP.
//!
//! # Architecture
//!
//! - [`RequestConfig`] - Optional request fields, set one at a time
//! - [`Operation`] - The two remote calls and the fields each one sends
//! - [`CommentAnalyzer`] - Trait defining API operations
//! - [`HttpCommentAnalyzer`] - Real HTTP implementation using reqwest
//! - [`mock::MockCommentAnalyzer`] - Mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Implementation)
//!
//! ```ignore
//! use comment_analyzer::analyzer::mock::MockCommentAnalyzer;
//!
//! let mock = MockCommentAnalyzer::new();
//! mock.set_analyze_result(Ok(json!({"attributeScores": {}}).into()));
//!
//! let result = my_moderator.review(&mock, "some text").await;
//! assert_eq!(mock.analyze_calls().len(), 1);
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_post("/v1alpha1/comments:analyze")
//!     .with_query("key", "test-key")
//!     .respond_with_json(json!({"attributeScores": {}}))
//!     .mount()
//!     .await;
//!
//! let client = HttpCommentAnalyzer::new("test-key").with_base_url(server.base_url());
//! let result = client.analyze(&request).await.unwrap();
//! ```

mod client;
mod request;
mod types;

pub use client::{
    AnalyzerError, CommentAnalyzer, HttpCommentAnalyzer, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use request::{Field, Operation, RequestConfig};
pub use types::{
    AnalysisResult, AttributeParameters, AttributeScore, AttributeScores, Comment, Context,
    ContextEntry, RequestedAttributes, Score, SpanScore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
