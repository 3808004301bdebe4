//! Sender authentication ("whitelabel") types: domains, reverse DNS IPs
//! and branded links.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::common::LimitOffsetParams;

/// A DNS record the account owner must publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Whether the record currently resolves as expected.
    #[serde(default)]
    pub valid: bool,
    /// Record type (`cname`, `txt`, `mx`, `a`).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Host name to publish.
    pub host: String,
    /// Record value.
    pub data: String,
}

/// DNS records for an authenticated domain.
///
/// Which records are present depends on `automatic_security` and
/// `custom_spf`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDns {
    /// Mail CNAME (automatic security).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_cname: Option<DnsRecord>,
    /// First DKIM CNAME (automatic security).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dkim1: Option<DnsRecord>,
    /// Second DKIM CNAME (automatic security).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dkim2: Option<DnsRecord>,
    /// MX record (manual security).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_server: Option<DnsRecord>,
    /// Subdomain SPF TXT record (manual security).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain_spf: Option<DnsRecord>,
    /// Domain SPF TXT record (custom SPF).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_spf: Option<DnsRecord>,
    /// DKIM TXT record (manual security).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dkim: Option<DnsRecord>,
}

/// An authenticated sending domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain ID.
    pub id: u64,
    /// Owning user ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Subdomain used for the return path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// Root domain.
    pub domain: String,
    /// Owning username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IPs associated with the domain.
    #[serde(default)]
    pub ips: Vec<String>,
    /// Whether a custom SPF record is used.
    #[serde(default)]
    pub custom_spf: bool,
    /// Whether this is the account's default domain.
    #[serde(rename = "default", default)]
    pub is_default: bool,
    /// Pre-2015 whitelabel.
    #[serde(default)]
    pub legacy: bool,
    /// Whether SendGrid manages SPF and DKIM.
    #[serde(default)]
    pub automatic_security: bool,
    /// Whether all records validate.
    #[serde(default)]
    pub valid: bool,
    /// Records to publish.
    #[serde(default)]
    pub dns: DomainDns,
}

/// Parameters for listing authenticated domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainListParams {
    /// Pagination.
    pub page: LimitOffsetParams,
    /// Leave out subusers' domains.
    pub exclude_subusers: bool,
    /// Only domains owned by this username.
    pub username: Option<String>,
    /// Only this domain.
    pub domain: Option<String>,
}

impl DomainListParams {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = self.page.to_query();
        params.push((
            "exclude_subusers".to_string(),
            self.exclude_subusers.to_string(),
        ));
        if let Some(username) = &self.username {
            params.push(("username".to_string(), username.clone()));
        }
        if let Some(domain) = &self.domain {
            params.push(("domain".to_string(), domain.clone()));
        }
        params
    }
}

/// Request body for authenticating a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateDomainRequest {
    /// Root domain.
    pub domain: String,
    /// Return-path subdomain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// Create the domain for this subuser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IPs to associate.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ips: Vec<String>,
    /// Use a custom SPF record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_spf: Option<bool>,
    /// Make this the default domain.
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Let SendGrid manage SPF and DKIM.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automatic_security: Option<bool>,
    /// Custom DKIM selector (three characters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_dkim_selector: Option<String>,
}

impl CreateDomainRequest {
    /// Creates a request for a domain with provider defaults.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Sets the subdomain.
    #[must_use]
    pub fn subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = Some(subdomain.into());
        self
    }

    /// Creates the domain on behalf of a subuser.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Adds an IP.
    #[must_use]
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ips.push(ip.into());
        self
    }

    /// Sets automatic security.
    #[must_use]
    pub fn automatic_security(mut self, enabled: bool) -> Self {
        self.automatic_security = Some(enabled);
        self
    }

    /// Sets the default flag.
    #[must_use]
    pub fn default_domain(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }
}

/// Request body for a partial domain update. Absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDomainRequest {
    /// Default flag.
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Custom SPF flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_spf: Option<bool>,
}

/// A user attached to a reverse DNS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpUser {
    /// Username.
    pub username: String,
    /// User ID.
    pub user_id: u64,
}

/// A reverse DNS (IP whitelabel) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpWhitelabel {
    /// Record ID.
    pub id: u64,
    /// IP address.
    pub ip: String,
    /// Reverse DNS name.
    pub rdns: String,
    /// Users of the IP.
    #[serde(default)]
    pub users: Vec<IpUser>,
    /// Subdomain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// Root domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Whether the A record validates.
    #[serde(default)]
    pub valid: bool,
    /// Pre-2015 whitelabel.
    #[serde(default)]
    pub legacy: bool,
    /// A record to publish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_record: Option<DnsRecord>,
}

/// Parameters for listing reverse DNS records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpListParams {
    /// Pagination.
    pub page: LimitOffsetParams,
    /// Only IPs containing this prefix.
    pub ip: Option<String>,
}

impl IpListParams {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = self.page.to_query();
        if let Some(ip) = &self.ip {
            params.push(("ip".to_string(), ip.clone()));
        }
        params
    }
}

/// Request body for setting up reverse DNS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateIpRequest {
    /// IP address.
    pub ip: String,
    /// Subdomain for the rDNS name.
    pub subdomain: String,
    /// Root domain.
    pub domain: String,
}

/// DNS records for a branded link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDns {
    /// CNAME for the link domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_cname: Option<DnsRecord>,
    /// CNAME proving account ownership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_cname: Option<DnsRecord>,
}

/// A branded link (link whitelabel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link ID.
    pub id: u64,
    /// Root domain.
    pub domain: String,
    /// Subdomain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// Owning username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Owning user ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Whether this is the default link.
    #[serde(rename = "default", default)]
    pub is_default: bool,
    /// Whether all records validate.
    #[serde(default)]
    pub valid: bool,
    /// Pre-2015 whitelabel.
    #[serde(default)]
    pub legacy: bool,
    /// Records to publish.
    #[serde(default)]
    pub dns: LinkDns,
}

/// Request body for creating a branded link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateLinkRequest {
    /// Root domain.
    pub domain: String,
    /// Subdomain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// Make this the default link.
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl CreateLinkRequest {
    /// Creates a request for a domain.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Sets the subdomain.
    #[must_use]
    pub fn subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = Some(subdomain.into());
        self
    }

    /// Sets the default flag.
    #[must_use]
    pub fn default_link(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }
}

/// Outcome of one DNS check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCheck {
    /// Whether the record validated.
    pub valid: bool,
    /// Why it failed, when it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of asking the provider to re-check DNS records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// ID of the validated resource.
    pub id: u64,
    /// Overall result.
    pub valid: bool,
    /// Per-record results keyed by record name (`mail_cname`, `a_record`, ...).
    #[serde(default)]
    pub validation_results: HashMap<String, ValidationCheck>,
}

impl ValidationResult {
    /// Names of the records that failed, sorted.
    pub fn failed_records(&self) -> Vec<&str> {
        let mut failed: Vec<&str> = self
            .validation_results
            .iter()
            .filter(|(_, check)| !check.valid)
            .map(|(name, _)| name.as_str())
            .collect();
        failed.sort_unstable();
        failed
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct IpBody<'a> {
    pub ip: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UsernameBody<'a> {
    pub username: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DefaultFlagBody {
    #[serde(rename = "default")]
    pub is_default: bool,
}
