//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - wiremock wrapper for stubbing the API
//! - [`client_for`] - `HttpCommentAnalyzer` pointed at a mock server

#![allow(dead_code)]

pub mod http_mock;

use comment_analyzer::analyzer::HttpCommentAnalyzer;
use http_mock::MockHttpServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Client using `TEST_API_KEY` that talks to `server`.
pub fn client_for(server: &MockHttpServer) -> HttpCommentAnalyzer {
    HttpCommentAnalyzer::new(TEST_API_KEY).with_base_url(server.base_url())
}
