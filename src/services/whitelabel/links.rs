//! Branded links (`/whitelabel/links`).

use tracing::instrument;

use super::domains::username_query;
use crate::errors::SendGridResult;
use crate::services::context::{require_segment, RequestOptions, ServiceContext};
use crate::types::common::LimitOffsetParams;
use crate::types::whitelabel::{
    CreateLinkRequest, DefaultFlagBody, Link, UsernameBody, ValidationResult,
};

const BASE_PATH: &str = "whitelabel/links";

/// Service for branded links.
#[derive(Debug, Clone)]
pub struct LinksService {
    ctx: ServiceContext,
}

impl LinksService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Returns a view of this service that sends with `options`.
    #[must_use]
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self::new(self.ctx.with_options(options))
    }

    /// Lists branded links.
    #[instrument(skip(self))]
    pub async fn list(&self, params: LimitOffsetParams) -> SendGridResult<Vec<Link>> {
        self.ctx.get(BASE_PATH, params.to_query()).await
    }

    /// Gets a branded link.
    #[instrument(skip(self))]
    pub async fn get(&self, link_id: u64) -> SendGridResult<Link> {
        self.ctx
            .get(&format!("{BASE_PATH}/{link_id}"), Vec::new())
            .await
    }

    /// Gets the default link, optionally the one used for `domain`.
    #[instrument(skip(self))]
    pub async fn get_default(&self, domain: Option<&str>) -> SendGridResult<Link> {
        let query = domain
            .map(|d| vec![("domain".to_string(), d.to_string())])
            .unwrap_or_default();
        self.ctx.get(&format!("{BASE_PATH}/default"), query).await
    }

    /// Creates a branded link.
    #[instrument(skip(self, request), fields(domain = %request.domain))]
    pub async fn create(&self, request: &CreateLinkRequest) -> SendGridResult<Link> {
        require_segment("domain", &request.domain)?;
        self.ctx.post(BASE_PATH, request).await
    }

    /// Sets or clears the default flag.
    #[instrument(skip(self))]
    pub async fn update(&self, link_id: u64, is_default: bool) -> SendGridResult<Link> {
        self.ctx
            .patch(
                &format!("{BASE_PATH}/{link_id}"),
                &DefaultFlagBody { is_default },
            )
            .await
    }

    /// Deletes a branded link.
    #[instrument(skip(self))]
    pub async fn delete(&self, link_id: u64) -> SendGridResult<()> {
        self.ctx
            .delete(&format!("{BASE_PATH}/{link_id}"), Vec::new())
            .await
    }

    /// Asks the provider to re-check the link's DNS records.
    #[instrument(skip(self))]
    pub async fn validate(&self, link_id: u64) -> SendGridResult<ValidationResult> {
        self.ctx
            .post_empty(&format!("{BASE_PATH}/{link_id}/validate"))
            .await
    }

    /// Gets the link associated with a subuser.
    #[instrument(skip(self))]
    pub async fn associated_link(&self, username: &str) -> SendGridResult<Link> {
        require_segment("username", username)?;
        self.ctx
            .get(&format!("{BASE_PATH}/subuser"), username_query(username))
            .await
    }

    /// Associates a link with a subuser.
    #[instrument(skip(self))]
    pub async fn associate(&self, link_id: u64, username: &str) -> SendGridResult<Link> {
        require_segment("username", username)?;
        self.ctx
            .post(
                &format!("{BASE_PATH}/{link_id}/subuser"),
                &UsernameBody { username },
            )
            .await
    }

    /// Removes a subuser's link association.
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
                tracing::debug!("No link association to remove");
                Ok(())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{fixtures, MockResponse, MockTransport};
    use crate::services::test_context;
    use crate::transport::HttpMethod;
    use std::sync::Arc;

    fn service() -> (LinksService, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        (LinksService::new(test_context(&mock)), mock)
    }

    #[tokio::test]
    async fn test_list_paging() {
        let (service, mock) = service();
        mock.queue_json(&serde_json::json!([fixtures::link(1, "example.com")]));

        let links = service.list(LimitOffsetParams::new(10, 20)).await.unwrap();

        assert_eq!(links[0].dns.domain_cname.as_ref().unwrap().host, "links.example.com");
        let request = mock.last_request().unwrap();
        assert_eq!(request.query_param("limit"), Some("10"));
        assert_eq!(request.query_param("offset"), Some("20"));
    }

    #[tokio::test]
    async fn test_get_default_with_and_without_domain() {
        let (service, mock) = service();
        mock.set_default(MockResponse::json(&fixtures::link(1, "example.com")));

        service.get_default(None).await.unwrap();
        service.get_default(Some("example.com")).await.unwrap();

        let requests = mock.requests();
        assert!(requests[0].query.is_empty());
        assert_eq!(requests[1].path, "whitelabel/links/default");
        assert_eq!(requests[1].query_param("domain"), Some("example.com"));
    }

    #[tokio::test]
    async fn test_create_and_update_default_flag() {
        let (service, mock) = service();
        mock.queue(MockResponse::json(&fixtures::link(5, "example.com")).with_status(201));
        mock.queue_json(&fixtures::link(5, "example.com"));

        service
            .create(&CreateLinkRequest::new("example.com").subdomain("links"))
            .await
            .unwrap();
        service.update(5, true).await.unwrap();

        let requests = mock.requests();
        assert_eq!(
            requests[0].body_json().unwrap(),
            serde_json::json!({"domain": "example.com", "subdomain": "links"})
        );
        assert_eq!(requests[1].method, HttpMethod::Patch);
        assert_eq!(requests[1].body_json().unwrap(), serde_json::json!({"default": true}));
    }

    #[tokio::test]
    async fn test_subuser_association_roundtrip() {
        let (service, mock) = service();
        mock.queue_json(&fixtures::link(5, "example.com"));
        mock.queue_json(&fixtures::link(5, "example.com"));
        mock.queue_error(404, "no association");

        let associated = service.associate(5, "jdoe").await.unwrap();
        let fetched = service.associated_link("jdoe").await.unwrap();
        service.disassociate("jdoe").await.unwrap();

        assert_eq!(associated.id, fetched.id);
        let requests = mock.requests();
        assert_eq!(requests[0].path, "whitelabel/links/5/subuser");
        assert_eq!(requests[2].method, HttpMethod::Delete);
        assert_eq!(requests[2].query_param("username"), Some("jdoe"));
    }

    #[tokio::test]
    async fn test_validate_path() {
        let (service, mock) = service();
        mock.queue_json(&serde_json::json!({"id": 5, "valid": true, "validation_results": {}}));

        service.validate(5).await.unwrap();

        assert_eq!(mock.last_request().unwrap().path, "whitelabel/links/5/validate");
    }
}
