//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing of the comment analyzer API.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_post("/v1alpha1/comments:analyze")
//!         .with_query("key", "test-key")
//!         .respond_with_json(json!({"attributeScores": {}}))
//!         .mount()
//!         .await;
//!
//!     let client = HttpCommentAnalyzer::new("test-key").with_base_url(server.base_url());
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)`
//! - **Error response**: `.respond_with_status(400).with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`,
//!   or inspect `server.received_bodies().await`

#![allow(dead_code)]

use std::time::Duration;

use serde_json::Value;
pub use wiremock::matchers::{body_json, header, method, path, query_param};
pub use wiremock::MockServer as WiremockServer;
pub use wiremock::{Mock, ResponseTemplate};

/// API version prefix the client appends operations to.
pub const API_PREFIX: &str = "/v1alpha1";

/// Wrapper around a `wiremock` server.
pub struct MockHttpServer {
    server: WiremockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: WiremockServer::start().await,
        }
    }

    /// Root URL of the server, without any path.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Base URL to hand to `HttpCommentAnalyzer::with_base_url`.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), API_PREFIX)
    }

    /// Access the underlying `wiremock` server for custom matchers.
    pub fn inner(&self) -> &WiremockServer {
        &self.server
    }

    /// Start building a stub for a POST to `path`.
    pub fn expect_post(&self, request_path: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            mock: Mock::given(method("POST")).and(path(request_path)),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Assert all `expect_times` expectations were met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// JSON bodies of every request received so far, in arrival order.
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Full request records, for header and URL assertions.
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// Declarative stub under construction.
pub struct StubBuilder<'a> {
    server: &'a WiremockServer,
    mock: wiremock::MockBuilder,
    status: u16,
    body: Option<Value>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.mock = self.mock.and(header(name, value));
        self
    }

    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.mock = self.mock.and(query_param(name, value));
        self
    }

    /// Only match requests whose JSON body equals `expected`.
    pub fn with_body_json(mut self, expected: Value) -> Self {
        self.mock = self.mock.and(body_json(expected));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Alias of `respond_with_json` that reads better after a status.
    pub fn with_json_response(self, body: Value) -> Self {
        self.respond_with_json(body)
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status);
        if let Some(body) = self.body {
            template = template.set_body_json(body);
        }
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = self.mock.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
