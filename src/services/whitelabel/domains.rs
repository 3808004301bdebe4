//! Authenticated domains (`/whitelabel/domains`).

use tracing::instrument;

use crate::errors::SendGridResult;
use crate::services::context::{require_segment, RequestOptions, ServiceContext};
use crate::types::whitelabel::{
    CreateDomainRequest, Domain, DomainListParams, IpBody, UpdateDomainRequest, UsernameBody,
    ValidationResult,
};

const BASE_PATH: &str = "whitelabel/domains";

/// Service for authenticated sending domains.
#[derive(Debug, Clone)]
pub struct DomainsService {
    ctx: ServiceContext,
}

impl DomainsService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Returns a view of this service that sends with `options`.
    #[must_use]
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self::new(self.ctx.with_options(options))
    }

    /// Lists authenticated domains.
    #[instrument(skip(self))]
    pub async fn list(&self, params: &DomainListParams) -> SendGridResult<Vec<Domain>> {
        self.ctx.get(BASE_PATH, params.to_query()).await
    }

    /// Gets a domain.
    #[instrument(skip(self))]
    pub async fn get(&self, domain_id: u64) -> SendGridResult<Domain> {
        self.ctx
            .get(&format!("{BASE_PATH}/{domain_id}"), Vec::new())
            .await
    }

    /// Gets the default domain.
    #[instrument(skip(self))]
    pub async fn get_default(&self) -> SendGridResult<Domain> {
        self.ctx
            .get(&format!("{BASE_PATH}/default"), Vec::new())
            .await
    }

    /// Authenticates a new domain.
    #[instrument(skip(self, request), fields(domain = %request.domain))]
    pub async fn create(&self, request: &CreateDomainRequest) -> SendGridResult<Domain> {
        require_segment("domain", &request.domain)?;
        self.ctx.post(BASE_PATH, request).await
    }

    /// Partially updates a domain.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        domain_id: u64,
        request: &UpdateDomainRequest,
    ) -> SendGridResult<Domain> {
        self.ctx
            .patch(&format!("{BASE_PATH}/{domain_id}"), request)
            .await
    }

    /// Deletes a domain.
    #[instrument(skip(self))]
    pub async fn delete(&self, domain_id: u64) -> SendGridResult<()> {
        self.ctx
            .delete(&format!("{BASE_PATH}/{domain_id}"), Vec::new())
            .await
    }

    /// Associates an IP with a domain.
    #[instrument(skip(self))]
    pub async fn add_ip(&self, domain_id: u64, ip: &str) -> SendGridResult<Domain> {
        require_segment("ip", ip)?;
        self.ctx
            .post(&format!("{BASE_PATH}/{domain_id}/ips"), &IpBody { ip })
            .await
    }

    /// Removes an IP from a domain.
    #[instrument(skip(self))]
    pub async fn remove_ip(&self, domain_id: u64, ip: &str) -> SendGridResult<Domain> {
        require_segment("ip", ip)?;
        self.ctx
            .delete_returning(&format!("{BASE_PATH}/{domain_id}/ips/{ip}"))
            .await
    }

    /// Asks the provider to re-check the domain's DNS records.
    #[instrument(skip(self))]
    pub async fn validate(&self, domain_id: u64) -> SendGridResult<ValidationResult> {
        self.ctx
            .post_empty(&format!("{BASE_PATH}/{domain_id}/validate"))
            .await
    }

    /// Gets the domain associated with a subuser.
    #[instrument(skip(self))]
    pub async fn associated_domain(&self, username: &str) -> SendGridResult<Domain> {
        require_segment("username", username)?;
        self.ctx
            .get(&format!("{BASE_PATH}/subuser"), username_query(username))
            .await
    }

    /// Associates a domain with a subuser.
    #[instrument(skip(self))]
    pub async fn associate(&self, domain_id: u64, username: &str) -> SendGridResult<Domain> {
        require_segment("username", username)?;
        self.ctx
            .post(
                &format!("{BASE_PATH}/{domain_id}/subuser"),
                &UsernameBody { username },
            )
            .await
    }

    /// Removes a subuser's domain association.
    ///
    /// Succeeds when the subuser has no association (HTTP 404).
    #[instrument(skip(self))]
    pub async fn disassociate(&self, username: &str) -> SendGridResult<()> {
        require_segment("username", username)?;
        match self
            .ctx
            .delete(&format!("{BASE_PATH}/subuser"), username_query(username))
            .await
        {
            Err(err) if err.is_not_found() => {
                tracing::debug!("No domain association to remove");
                Ok(())
            }
            other => other,
        }
    }
}

pub(super) fn username_query(username: &str) -> Vec<(String, String)> {
    vec![("username".to_string(), username.to_string())]
}
