//! Request plumbing shared by every resource service.

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::auth::AuthProvider;
use crate::errors::{SendGridError, SendGridResult};
use crate::observability::redact_api_keys;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Per-call options attached to every request a service view sends.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the client timeout.
    pub timeout: Option<Duration>,
    /// Aborts in-flight requests and pending retries when cancelled.
    pub cancellation: Option<CancellationToken>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the cancellation token.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Transport, credentials and headers a service sends with.
#[derive(Clone)]
pub(crate) struct ServiceContext {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    default_headers: Arc<[(String, String)]>,
    options: RequestOptions,
}

impl ServiceContext {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
        default_headers: Vec<(String, String)>,
    ) -> Self {
        Self {
            transport,
            auth,
            default_headers: default_headers.into(),
            options: RequestOptions::default(),
        }
    }

    /// Same context with different per-call options.
    pub(crate) fn with_options(&self, options: RequestOptions) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    fn build_request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, path);
        for (name, value) in self.default_headers.iter() {
            request.set_header(name.as_str(), value.as_str());
        }
        request.set_header("Accept", "application/json");
        request.set_header(
            "Authorization",
            self.auth.authorization().expose_secret().as_str(),
        );

        if let Some(timeout) = self.options.timeout {
            request = request.with_timeout(timeout);
        }
        if let Some(token) = &self.options.cancellation {
            request = request.with_cancellation(token.clone());
        }
        request
    }

    async fn execute(&self, request: HttpRequest) -> SendGridResult<HttpResponse> {
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            debug!(
                status = response.status,
                body = %redact_api_keys(&String::from_utf8_lossy(&response.body)),
                "SendGrid returned an error"
            );
            return Err(SendGridError::from_response(&response));
        }

        Ok(response)
    }

    async fn call<T: DeserializeOwned>(&self, request: HttpRequest) -> SendGridResult<T> {
        let response = self.execute(request).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| SendGridError::decode(&e, &response.body))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> SendGridResult<T> {
        let request = self.build_request(HttpMethod::Get, path).with_query(query);
        self.call(request).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> SendGridResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .build_request(HttpMethod::Post, path)
            .with_json_body(encode(body)?);
        self.call(request).await
    }

    /// POST without a request body, decoding the response.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> SendGridResult<T> {
        self.call(self.build_request(HttpMethod::Post, path)).await
    }

    /// POST whose response body, if any, is ignored.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: Option<&B>) -> SendGridResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.build_request(HttpMethod::Post, path);
        if let Some(body) = body {
            request = request.with_json_body(encode(body)?);
        }
        self.execute(request).await.map(|_| ())
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> SendGridResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .build_request(HttpMethod::Patch, path)
            .with_json_body(encode(body)?);
        self.call(request).await
    }

    pub(crate) async fn delete(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> SendGridResult<()> {
        let request = self.build_request(HttpMethod::Delete, path).with_query(query);
        self.execute(request).await.map(|_| ())
    }

    /// DELETE carrying a JSON body, as the bulk endpoints expect.
    pub(crate) async fn delete_with_body<B>(&self, path: &str, body: &B) -> SendGridResult<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .build_request(HttpMethod::Delete, path)
            .with_json_body(encode(body)?);
        self.execute(request).await.map(|_| ())
    }

    /// DELETE decoding the response body.
    pub(crate) async fn delete_returning<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> SendGridResult<T> {
        self.call(self.build_request(HttpMethod::Delete, path)).await
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("auth", &self.auth)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> SendGridResult<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| SendGridError::Validation {
        message: format!("Failed to encode request body: {e}"),
        field: None,
    })
}

/// Rejects identifiers that would change the request path.
pub(crate) fn require_segment(field: &str, value: &str) -> SendGridResult<()> {
    if value.trim().is_empty() {
        return Err(SendGridError::validation(
            format!("{field} is required"),
            field,
        ));
    }
    if value.contains(['/', '\\', '?', '#']) {
        return Err(SendGridError::validation(
            format!("{field} must not contain '/', '\\', '?' or '#'"),
            field,
        ));
    }
    // URL parsing resolves `.` and `..` (also as `%2e`) against the base path.
    let decoded = value.to_ascii_lowercase().replace("%2e", ".");
    if decoded == "." || decoded == ".." {
        return Err(SendGridError::validation(
            format!("{field} must not be a dot segment"),
            field,
        ));
    }
    Ok(())
}
