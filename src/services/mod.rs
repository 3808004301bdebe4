//! Service implementations for the SendGrid API.
//!
//! One service per resource. Each call builds a path, sends exactly one
//! request through the client's transport, and decodes the result;
//! retries happen below, in the transport.

mod context;
mod custom_fields;
mod lists;
mod segments;
mod templates;
mod whitelabel;

pub use context::RequestOptions;
pub use custom_fields::CustomFieldsService;
pub use lists::ListsService;
pub use segments::SegmentsService;
pub use templates::TemplatesService;
pub use whitelabel::{DomainsService, IpsService, LinksService, WhitelabelService};

pub(crate) use context::ServiceContext;

#[cfg(test)]
pub(crate) fn test_context(mock: &std::sync::Arc<crate::mocks::MockTransport>) -> ServiceContext {
    ServiceContext::new(
        mock.clone(),
        std::sync::Arc::new(crate::mocks::MockAuth::default()),
        Vec::new(),
    )
}
