//! Integration tests using WireMock
//!
//! These tests drive the real reqwest transport against a mock HTTP server
//! and check the full request/response cycle: paths, query strings,
//! authentication headers, envelopes, error mapping and retries.

mod contacts;
mod resilience;
mod templates;
mod webhooks;
mod whitelabel;

use std::sync::Arc;
use std::time::Duration;

use sendgrid_client::{FixedDelay, RetryPolicy, SendGridClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "SG.integration.key";

/// Starts a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at `server` under `/v3`, retrying quickly.
pub fn client_for(server: &MockServer) -> SendGridClient {
    client_with_policy(
        server,
        Arc::new(FixedDelay::new(2, Duration::from_millis(10))),
    )
}

/// Client pointed at `server` under `/v3` with an explicit retry policy.
pub fn client_with_policy(server: &MockServer, policy: Arc<dyn RetryPolicy>) -> SendGridClient {
    SendGridClient::builder()
        .api_key(API_KEY)
        .base_url(format!("{}/v3", server.uri()))
        .retry_policy(policy)
        .build()
        .expect("Failed to build client")
}

/// Matcher for an authenticated call.
pub fn mock_with_auth(method_matcher: &str, path_matcher: &str) -> wiremock::MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
}

/// SendGrid-shaped error response.
pub fn error_response(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "errors": [{ "field": null, "message": message }]
    }))
}

/// Success response with a JSON body.
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
