//! Resilience layer for the SendGrid client.
//!
//! Holds the [`RetryPolicy`] contract and its bundled implementations. The
//! policies only decide; the loop that enacts them lives in
//! [`RetryingTransport`](crate::transport::RetryingTransport).

mod retry;

pub use retry::{
    parse_retry_after, AttemptOutcome, ExponentialBackoff, FixedDelay, NoRetry, RetryConfig,
    RetryPolicy,
};
