//! Transport wrapper that enacts a [`RetryPolicy`].

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::resilience::{AttemptOutcome, RetryPolicy};

/// Sends through an inner transport, retrying transient failures.
///
/// A 2xx response ends the loop, as does any outcome the policy declines
/// to retry; the last response or error is then returned unchanged.
/// Backoff sleeps are interrupted by the request's cancellation token, and
/// a cancelled attempt is never retried.
pub struct RetryingTransport {
    inner: Arc<dyn HttpTransport>,
    policy: Arc<dyn RetryPolicy>,
}

impl RetryingTransport {
    /// Wraps a transport with a retry policy.
    pub fn new(inner: Arc<dyn HttpTransport>, policy: Arc<dyn RetryPolicy>) -> Self {
        Self { inner, policy }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> &Arc<dyn RetryPolicy> {
        &self.policy
    }

    fn decide(&self, attempt: u32, outcome: &AttemptOutcome<'_>) -> Option<Duration> {
        if !self.policy.should_retry(attempt, outcome) {
            if outcome.is_transient() {
                debug!(attempt, status = ?outcome.status(), "Giving up after retries");
            }
            return None;
        }

        let delay = self.policy.next_delay(attempt, outcome);
        match outcome {
            AttemptOutcome::Response(response) => warn!(
                attempt,
                status = response.status,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying after error response"
            ),
            AttemptOutcome::TransportFailure(err) => warn!(
                attempt,
                error = %err,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying after transport failure"
            ),
        }
        Some(delay)
    }
}

#[async_trait]
impl HttpTransport for RetryingTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let token = request.cancellation.clone();
        let mut attempt: u32 = 0;

        loop {
            let result = self.inner.send(request.clone()).await;
            attempt = attempt.saturating_add(1);

            let delay = match &result {
                Ok(response) if response.is_success() => None,
                Err(TransportError::Cancelled) => None,
                Ok(response) => self.decide(attempt, &AttemptOutcome::Response(response)),
                Err(err) => self.decide(attempt, &AttemptOutcome::TransportFailure(err)),
            };

            let Some(delay) = delay else {
                return result;
            };

            match &token {
                Some(token) => {
                    tokio::select! {
                        biased;
                        () = token.cancelled() => return Err(TransportError::Cancelled),
                        () = tokio::time::sleep(delay) => {}
                    }
                }
                None => tokio::time::sleep(delay).await,
            }
        }
    }
}

impl fmt::Debug for RetryingTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingTransport")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockResponse, MockTransport};
    use crate::resilience::{ExponentialBackoff, FixedDelay, NoRetry, RetryConfig};
    use tokio_util::sync::CancellationToken;

    fn fast_policy(max_retries: u32) -> Arc<dyn RetryPolicy> {
        Arc::new(FixedDelay::new(max_retries, Duration::from_millis(1)))
    }

    #[tokio::test]
    async fn test_success_is_not_retried() {
        let mock = Arc::new(MockTransport::new());
        mock.queue_json(&serde_json::json!({"id": 1}));
        let transport = RetryingTransport::new(mock.clone(), fast_policy(3));

        let response = transport.send(HttpRequest::get("templates")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_retries_server_errors_until_success() {
        let mock = Arc::new(MockTransport::new());
        mock.queue_error(503, "unavailable");
        mock.queue_error(500, "boom");
        mock.queue_json(&serde_json::json!({"id": 1}));
        let transport = RetryingTransport::new(mock.clone(), fast_policy(3));

        let response = transport.send(HttpRequest::get("templates")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_return_last_response() {
        let mock = Arc::new(MockTransport::new());
        mock.set_default(MockResponse::error(500, "still broken"));
        let transport = RetryingTransport::new(mock.clone(), fast_policy(2));

        let response = transport.send(HttpRequest::get("templates")).await.unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(mock.request_count(), 3); // 1 initial + 2 retries
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let mock = Arc::new(MockTransport::new());
        mock.set_default(MockResponse::error(404, "not found"));
        let transport = RetryingTransport::new(mock.clone(), fast_policy(3));

        let response = transport.send(HttpRequest::get("templates/x")).await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failures_are_retried() {
        let mock = Arc::new(MockTransport::new());
        mock.queue_failure(TransportError::Connection {
            message: "connection reset".to_string(),
        });
        mock.queue_json(&serde_json::json!({}));
        let transport = RetryingTransport::new(mock.clone(), fast_policy(1));

        let response = transport.send(HttpRequest::get("templates")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_attempt_is_not_retried() {
        let mock = Arc::new(MockTransport::new());
        mock.queue_failure(TransportError::Cancelled);
        mock.queue_json(&serde_json::json!({}));
        let transport = RetryingTransport::new(mock.clone(), fast_policy(3));

        let result = transport.send(HttpRequest::get("templates")).await;

        assert!(matches!(result, Err(TransportError::Cancelled)));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_backoff() {
        let mock = Arc::new(MockTransport::new());
        mock.set_default(MockResponse::error(503, "unavailable"));
        let policy: Arc<dyn RetryPolicy> = Arc::new(FixedDelay::new(5, Duration::from_secs(60)));
        let transport = RetryingTransport::new(mock.clone(), policy);

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let started = std::time::Instant::now();
        let result = transport
            .send(HttpRequest::get("templates").with_cancellation(token))
            .await;

        assert!(matches!(result, Err(TransportError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_retry_after_header_is_honored() {
        let mock = Arc::new(MockTransport::new());
        mock.queue(MockResponse::error(429, "slow down").with_header("Retry-After", "0"));
        mock.queue_json(&serde_json::json!({}));
        // A large computed backoff would stall the test; Retry-After: 0 must win.
        let policy: Arc<dyn RetryPolicy> = Arc::new(ExponentialBackoff::new(
            RetryConfig::new()
                .initial_delay(Duration::from_secs(60))
                .jitter(0.0),
        ));
        let transport = RetryingTransport::new(mock.clone(), policy);

        let response = tokio::time::timeout(
            Duration::from_secs(5),
            transport.send(HttpRequest::get("templates")),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_no_retry_policy_passes_through() {
        let mock = Arc::new(MockTransport::new());
        mock.set_default(MockResponse::error(503, "unavailable"));
        let transport = RetryingTransport::new(mock.clone(), Arc::new(NoRetry));

        let response = transport.send(HttpRequest::get("templates")).await.unwrap();

        assert_eq!(response.status, 503);
        assert_eq!(mock.request_count(), 1);
    }
}
