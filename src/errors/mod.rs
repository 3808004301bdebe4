//! Error types for the SendGrid client.
//!
//! Callers can tell rate limiting apart from a genuine client error, a
//! network failure, or a response that did not match the expected shape.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::resilience::parse_retry_after;
use crate::transport::{HttpResponse, TransportError};

/// Result type alias for SendGrid operations.
pub type SendGridResult<T> = Result<T, SendGridError>;

/// Error type for SendGrid client operations.
#[derive(Debug, Error)]
pub enum SendGridError {
    /// Configuration error (missing API key, malformed base URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// A request parameter was rejected before anything was sent.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
        /// The parameter that caused the error.
        field: Option<String>,
    },

    /// Network-level failure (connection reset, timeout, unreadable body).
    #[error("Transport error: {0}")]
    Transport(TransportError),

    /// HTTP 429 from the provider.
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message.
        message: String,
        /// Provider-supplied `Retry-After` hint.
        retry_after: Option<Duration>,
        /// When the current rate limit window resets (`X-RateLimit-Reset`).
        reset_at: Option<DateTime<Utc>>,
        /// Raw response body.
        body: String,
    },

    /// Any other non-2xx status.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// First provider error message, or `HTTP <status>`.
        message: String,
        /// Parsed provider error details; empty when the body was not parseable.
        errors: Vec<ApiErrorItem>,
        /// Raw response body.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Error message from the JSON decoder.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// The request was cancelled by the caller.
    #[error("Request cancelled")]
    Cancelled,
}

impl SendGridError {
    /// Builds the error for a non-success response.
    pub fn from_response(response: &HttpResponse) -> Self {
        let body = String::from_utf8_lossy(&response.body).to_string();
        let errors = serde_json::from_slice::<ApiErrorResponse>(&response.body)
            .map(|parsed| parsed.errors)
            .unwrap_or_default();

        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .find(|m| !m.is_empty())
            .map_or_else(|| format!("HTTP {}", response.status), str::to_string);

        if response.status == 429 {
            let reset_at = response
                .header("x-ratelimit-reset")
                .and_then(|v| v.trim().parse::<i64>().ok())
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

            return SendGridError::RateLimit {
                message,
                retry_after: parse_retry_after(response),
                reset_at,
                body,
            };
        }

        SendGridError::Api {
            status: response.status,
            message,
            errors,
            body,
        }
    }

    /// Returns the HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SendGridError::RateLimit { .. } => Some(429),
            SendGridError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            SendGridError::RateLimit { .. } | SendGridError::Transport(_) => true,
            SendGridError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns the retry-after duration if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            SendGridError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns true for an HTTP 404 from the provider.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Creates a validation error for a parameter.
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        SendGridError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a decode error, keeping the raw body for inspection.
    pub fn decode(err: &serde_json::Error, body: &[u8]) -> Self {
        SendGridError::Decode {
            message: err.to_string(),
            body: String::from_utf8_lossy(body).to_string(),
        }
    }
}

impl From<TransportError> for SendGridError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => SendGridError::Cancelled,
            other => SendGridError::Transport(other),
        }
    }
}

impl From<url::ParseError> for SendGridError {
    fn from(err: url::ParseError) -> Self {
        SendGridError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

/// Error payload returned by SendGrid.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    /// The individual errors.
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

/// One entry of the provider's `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorItem {
    /// The request field the error refers to.
    #[serde(default)]
    pub field: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Link or structured help, when provided.
    #[serde(default)]
    pub help: Option<serde_json::Value>,
}
