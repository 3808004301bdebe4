//! Sender authentication ("whitelabel") services.

mod domains;
mod ips;
mod links;

pub use domains::DomainsService;
pub use ips::IpsService;
pub use links::LinksService;

use super::context::ServiceContext;

/// Entry point for the domain, IP and link authentication services.
#[derive(Debug, Clone)]
pub struct WhitelabelService {
    ctx: ServiceContext,
}

impl WhitelabelService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Authenticated domains.
    pub fn domains(&self) -> DomainsService {
        DomainsService::new(self.ctx.clone())
    }

    /// Reverse DNS records.
    pub fn ips(&self) -> IpsService {
        IpsService::new(self.ctx.clone())
    }

    /// Branded links.
    pub fn links(&self) -> LinksService {
        LinksService::new(self.ctx.clone())
    }
}
