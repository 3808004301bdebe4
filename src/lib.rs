//! SendGrid Client Library
//!
//! A typed async client for the SendGrid v3 REST API. Each remote resource
//! is exposed as a service whose methods build one request, send it through
//! a pluggable transport and decode the JSON response into typed records.
//!
//! # Features
//!
//! - **Templates**: transactional templates and their versions
//! - **Marketing contacts**: lists, recipients, segments and custom fields
//! - **Sender authentication**: domains, reverse DNS and branded links
//! - **Event Webhook**: typed models for posted delivery and engagement events
//! - **Resilience**: pluggable [`RetryPolicy`] applied centrally to every request,
//!   honoring `Retry-After`
//! - **Cancellation**: per-service timeouts and cancellation tokens
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sendgrid_client::{PageParams, SendGridClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SendGridClient::builder()
//!         .api_key("SG.your_api_key")
//!         .build()?;
//!
//!     for list in client.lists().list().await? {
//!         let recipients = client.lists().recipients(list.id, PageParams::default()).await?;
//!         println!("{}: {} recipients on page 1", list.name, recipients.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cancellation
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use sendgrid_client::{RequestOptions, SendGridClient};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(client: SendGridClient) -> Result<(), sendgrid_client::SendGridError> {
//! let token = CancellationToken::new();
//! let domains = client.whitelabel().domains().with_options(
//!     RequestOptions::new()
//!         .timeout(Duration::from_secs(5))
//!         .cancellation(token.clone()),
//! );
//!
//! let default = domains.get_default().await?;
//! println!("default domain: {}", default.domain);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod resilience;
pub mod services;
pub mod transport;
pub mod types;
pub mod webhooks;

// Re-exports for convenience
pub use client::{SendGridClient, SendGridClientBuilder};
pub use config::SendGridConfig;
pub use errors::{SendGridError, SendGridResult};
pub use resilience::{ExponentialBackoff, FixedDelay, NoRetry, RetryConfig, RetryPolicy};
pub use services::RequestOptions;
pub use webhooks::{parse_events, Event, EventBase};

// Type re-exports
pub use types::common::{LimitOffsetParams, PageParams};
pub use types::custom_fields::{CustomField, FieldType, ReservedField};
pub use types::lists::{List, Recipient};
pub use types::segments::{
    AndOr, ConditionOperator, CreateSegmentRequest, SearchCondition, Segment,
    UpdateSegmentRequest,
};
pub use types::templates::{
    CreateVersionRequest, GenerationFilter, ListTemplatesParams, Template, TemplateGeneration,
    TemplateVersion, UpdateVersionRequest,
};
pub use types::whitelabel::{
    CreateDomainRequest, CreateIpRequest, CreateLinkRequest, Domain, DomainListParams,
    IpListParams, IpWhitelabel, Link, UpdateDomainRequest, ValidationResult,
};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
