//! Type definitions for the SendGrid API.
//!
//! Records mirror the provider's JSON shapes. Write payloads omit unset
//! optional fields; parameter structs carry the provider's documented
//! defaults.

pub mod common;
pub mod custom_fields;
pub mod lists;
pub mod segments;
pub mod templates;
pub mod whitelabel;

pub use common::{LimitOffsetParams, PageParams};
pub use custom_fields::{CustomField, FieldType, ReservedField};
pub use lists::{List, Recipient, RecipientField};
pub use segments::{
    AndOr, ConditionOperator, CreateSegmentRequest, SearchCondition, Segment,
    UpdateSegmentRequest,
};
pub use templates::{
    CreateTemplateRequest, CreateVersionRequest, Editor, GenerationFilter, ListTemplatesParams,
    Template, TemplateGeneration, TemplateVersion, UpdateVersionRequest,
};
pub use whitelabel::{
    CreateDomainRequest, CreateIpRequest, CreateLinkRequest, DnsRecord, Domain, DomainDns,
    DomainListParams, IpListParams, IpUser, IpWhitelabel, Link, LinkDns, UpdateDomainRequest,
    ValidationCheck, ValidationResult,
};
