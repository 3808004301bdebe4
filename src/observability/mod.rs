//! Observability module for the SendGrid client.
//!
//! The client emits `tracing` spans and events; this module offers a
//! ready-made subscriber setup and the credential scrubber applied to
//! logged response bodies.

mod logging;

pub use logging::{redact_api_keys, LogFormat, LogLevel, LoggingConfig};
