//! Integration tests for retries, timeouts and cancellation

use super::*;
use sendgrid_client::transport::TransportError;
use sendgrid_client::{ExponentialBackoff, NoRetry, RequestOptions, RetryConfig, SendGridError};
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn lists_body() -> serde_json::Value {
    json!({"lists": [{"id": 1, "name": "Newsletter", "recipient_count": 3}]})
}

#[tokio::test]
async fn test_retries_server_errors_until_success() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(error_response(503, "unavailable"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(success_response(lists_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let lists = client.lists().list().await.unwrap();

    assert_eq!(lists[0].recipient_count, 3);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(error_response(500, "internal error"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.lists().list().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(error_response(400, "bad request"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.lists().list().await.unwrap_err();

    assert!(matches!(err, SendGridError::Api { status: 400, .. }));
}

#[tokio::test]
async fn test_retry_after_overrides_backoff() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(error_response(429, "too many requests").insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(success_response(lists_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Without Retry-After this would sleep for a minute.
    let policy = ExponentialBackoff::new(
        RetryConfig::new()
            .max_retries(1)
            .initial_delay(Duration::from_secs(60))
            .max_delay(Duration::from_secs(60))
            .jitter(0.0),
    );
    let client = client_with_policy(&mock_server, Arc::new(policy));

    let lists = tokio::time::timeout(Duration::from_secs(10), client.lists().list())
        .await
        .expect("Retry-After should have shortened the backoff")
        .unwrap();

    assert_eq!(lists.len(), 1);
}

#[tokio::test]
async fn test_rate_limit_error_carries_retry_after() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(
            error_response(429, "too many requests")
                .insert_header("Retry-After", "30")
                .insert_header("X-RateLimit-Reset", "1700000000"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_policy(&mock_server, Arc::new(NoRetry));
    let err = client.lists().list().await.unwrap_err();

    assert!(matches!(err, SendGridError::RateLimit { .. }));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn test_per_request_timeout() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(success_response(lists_body()).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = client_with_policy(&mock_server, Arc::new(NoRetry));
    let lists = client
        .lists()
        .with_options(RequestOptions::new().timeout(Duration::from_millis(100)));
    let err = lists.list().await.unwrap_err();

    assert!(matches!(
        err,
        SendGridError::Transport(TransportError::Timeout { .. })
    ));
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_request() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(success_response(lists_body()).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let token = CancellationToken::new();
    let lists = client
        .lists()
        .with_options(RequestOptions::new().cancellation(token.clone()));

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = std::time::Instant::now();
    let err = lists.list().await.unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, SendGridError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_already_cancelled_token_sends_nothing() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(success_response(lists_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .lists()
        .with_options(RequestOptions::new().cancellation(token))
        .list()
        .await
        .unwrap_err();

    assert!(matches!(err, SendGridError::Cancelled));
}

#[tokio::test]
async fn test_on_behalf_of_header_is_sent() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .and(wiremock::matchers::header("on-behalf-of", "subuser"))
        .respond_with(success_response(lists_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SendGridClient::builder()
        .api_key(API_KEY)
        .base_url(format!("{}/v3", mock_server.uri()))
        .on_behalf_of("subuser")
        .build()
        .unwrap();

    client.lists().list().await.unwrap();
}

#[tokio::test]
async fn test_excessive_retry_after_is_returned_to_caller() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(
            error_response(429, "too many requests")
                .insert_header("Retry-After", "18446744073709551615"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_policy(
        &mock_server,
        Arc::new(ExponentialBackoff::new(RetryConfig::new().jitter(0.0))),
    );
    let err = tokio::time::timeout(Duration::from_secs(10), client.lists().list())
        .await
        .expect("an oversized Retry-After must not be waited out")
        .unwrap_err();

    assert!(matches!(err, SendGridError::RateLimit { .. }));
}
