//! Mock implementations for testing.
//!
//! Provides a mock transport and auth provider for unit testing without
//! making real API calls, plus fixtures shaped like SendGrid payloads.

use async_trait::async_trait;
use parking_lot::Mutex;
use secrecy::SecretString;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::auth::AuthProvider;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock HTTP transport for testing.
///
/// Replays queued responses in order, then falls back to the default
/// response (a 500 when none is set). Every request is recorded.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<MockResponse, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
    latency: Mutex<Option<Duration>>,
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Per-request timeout, if one was set.
    pub timeout: Option<Duration>,
}

impl RecordedRequest {
    /// Parses the body as JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    /// Looks up a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Creates an error response in SendGrid's `{"errors": [...]}` shape.
    pub fn error(status: u16, message: &str) -> Self {
        let error = serde_json::json!({
            "errors": [{ "field": null, "message": message }]
        });

        Self::json(&error).with_status(status)
    }

    /// Creates a response with no body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a response with a raw body.
    pub fn raw(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Creates a response with custom status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
            latency: Mutex::new(None),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queues a 200 JSON response.
    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    /// Queues an error response.
    pub fn queue_error(&self, status: u16, message: &str) {
        self.queue(MockResponse::error(status, message));
    }

    /// Queues a network-level failure.
    pub fn queue_failure(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Sets the default response.
    pub fn set_default(&self, response: MockResponse) {
        *self.default_response.lock() = Some(response);
    }

    /// Delays every response, honoring the request's cancellation token.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn next_response(&self) -> Result<MockResponse, TransportError> {
        if let Some(next) = self.responses.lock().pop_front() {
            return next;
        }

        Ok(self
            .default_response
            .lock()
            .clone()
            .unwrap_or_else(|| MockResponse::error(500, "No mock response configured")))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            query: request.query.clone(),
            body: request.body.clone(),
            headers: request.headers.clone(),
            timeout: request.timeout,
        });

        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            match &request.cancellation {
                Some(token) => {
                    tokio::select! {
                        biased;
                        () = token.cancelled() => return Err(TransportError::Cancelled),
                        () = tokio::time::sleep(latency) => {}
                    }
                }
                None => tokio::time::sleep(latency).await,
            }
        }

        let response = self.next_response()?;
        Ok(HttpResponse {
            status: response.status,
            headers: response.headers,
            body: response.body,
        })
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// Mock auth provider for testing.
pub struct MockAuth {
    api_key: String,
}

impl MockAuth {
    /// Creates a new mock auth provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new("SG.mock.key")
    }
}

impl AuthProvider for MockAuth {
    fn authorization(&self) -> SecretString {
        SecretString::new(format!("Bearer {}", self.api_key))
    }
}

impl std::fmt::Debug for MockAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockAuth").finish()
    }
}

/// Test fixtures shaped like SendGrid responses.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A contact list.
    pub fn list(id: u64, name: &str) -> Value {
        json!({ "id": id, "name": name, "recipient_count": 0 })
    }

    /// A transactional template with one active version.
    pub fn template(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "generation": "dynamic",
            "updated_at": "2021-04-28 13:12:46",
            "versions": [template_version("ver-1", id, "v1")]
        })
    }

    /// A template version.
    pub fn template_version(id: &str, template_id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "template_id": template_id,
            "name": name,
            "subject": "{{subject}}",
            "html_content": "<p>Hello {{name}}</p>",
            "plain_content": "Hello {{name}}",
            "active": 1,
            "editor": "code",
            "updated_at": "2021-04-28 13:12:46"
        })
    }

    /// A segment with one condition.
    pub fn segment(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "list_id": 4,
            "recipient_count": 2,
            "conditions": [{
                "field": "last_name",
                "value": "Miller",
                "operator": "eq",
                "and_or": ""
            }]
        })
    }

    /// A recipient record.
    pub fn recipient(id: &str, email: &str) -> Value {
        json!({
            "id": id,
            "email": email,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "created_at": 1_422_313_607,
            "updated_at": 1_422_313_790,
            "last_clicked": null,
            "last_emailed": null,
            "last_opened": null,
            "custom_fields": [{ "id": 6234, "name": "age", "value": 35, "type": "number" }]
        })
    }

    /// An authenticated domain.
    pub fn domain(id: u64, domain: &str) -> Value {
        json!({
            "id": id,
            "user_id": 7,
            "subdomain": "em",
            "domain": domain,
            "username": "jdoe",
            "ips": ["192.168.1.1"],
            "custom_spf": false,
            "default": true,
            "legacy": false,
            "automatic_security": true,
            "valid": true,
            "dns": {
                "mail_cname": {
                    "valid": true,
                    "type": "cname",
                    "host": format!("em.{domain}"),
                    "data": "u7.wl.sendgrid.net"
                },
                "dkim1": {
                    "valid": true,
                    "type": "cname",
                    "host": format!("s1._domainkey.{domain}"),
                    "data": "s1.domainkey.u7.wl.sendgrid.net"
                }
            }
        })
    }

    /// A reverse-DNS IP whitelabel.
    pub fn ip_whitelabel(id: u64, ip: &str) -> Value {
        json!({
            "id": id,
            "ip": ip,
            "rdns": "o1.email.example.com",
            "users": [{ "username": "jdoe", "user_id": 7 }],
            "subdomain": "email",
            "domain": "example.com",
            "valid": true,
            "legacy": false,
            "a_record": {
                "valid": true,
                "type": "a",
                "host": "o1.email.example.com",
                "data": ip
            }
        })
    }

    /// A branded link.
    pub fn link(id: u64, domain: &str) -> Value {
        json!({
            "id": id,
            "domain": domain,
            "subdomain": "links",
            "username": "jdoe",
            "user_id": 7,
            "default": false,
            "valid": true,
            "legacy": false,
            "dns": {
                "domain_cname": {
                    "valid": true,
                    "type": "cname",
                    "host": format!("links.{domain}"),
                    "data": "sendgrid.net"
                },
                "owner_cname": {
                    "valid": true,
                    "type": "cname",
                    "host": format!("7.{domain}"),
                    "data": "sendgrid.net"
                }
            }
        })
    }
}
