//! HTTP transport layer for the SendGrid client.
//!
//! Provides the transport abstraction every service sends through, the
//! reqwest-backed implementation, and the retrying wrapper that applies a
//! [`RetryPolicy`](crate::resilience::RetryPolicy) uniformly underneath all
//! services.

mod http;
mod retrying;

pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use retrying::RetryingTransport;

use std::time::Duration;

/// Transport error types.
///
/// Only network-level failures are transport errors. An HTTP response with
/// any status code is a successful transport round-trip.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// The request's cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,
}
