//! Reverse DNS records (`/whitelabel/ips`).

use tracing::instrument;

use crate::errors::SendGridResult;
use crate::services::context::{require_segment, RequestOptions, ServiceContext};
use crate::types::whitelabel::{CreateIpRequest, IpListParams, IpWhitelabel, ValidationResult};

const BASE_PATH: &str = "whitelabel/ips";

/// Service for reverse DNS (IP whitelabel) records.
#[derive(Debug, Clone)]
pub struct IpsService {
    ctx: ServiceContext,
}

impl IpsService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Returns a view of this service that sends with `options`.
    #[must_use]
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self::new(self.ctx.with_options(options))
    }

    /// Lists reverse DNS records.
    #[instrument(skip(self))]
    pub async fn list(&self, params: &IpListParams) -> SendGridResult<Vec<IpWhitelabel>> {
        self.ctx.get(BASE_PATH, params.to_query()).await
    }

    /// Gets a reverse DNS record.
    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> SendGridResult<IpWhitelabel> {
        self.ctx.get(&format!("{BASE_PATH}/{id}"), Vec::new()).await
    }

    /// Sets up reverse DNS for an IP.
    #[instrument(skip(self, request), fields(ip = %request.ip))]
    pub async fn create(&self, request: &CreateIpRequest) -> SendGridResult<IpWhitelabel> {
        require_segment("ip", &request.ip)?;
        require_segment("domain", &request.domain)?;
        self.ctx.post(BASE_PATH, request).await
    }

    /// Deletes a reverse DNS record.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> SendGridResult<()> {
        self.ctx.delete(&format!("{BASE_PATH}/{id}"), Vec::new()).await
    }

    /// Asks the provider to re-check the A record.
    #[instrument(skip(self))]
    pub async fn validate(&self, id: u64) -> SendGridResult<ValidationResult> {
        self.ctx
            .post_empty(&format!("{BASE_PATH}/{id}/validate"))
            .await
    }
}
