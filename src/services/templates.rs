//! Transactional templates service.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::context::{require_segment, RequestOptions, ServiceContext};
use crate::errors::SendGridResult;
use crate::types::templates::{
    CreateTemplateRequest, CreateVersionRequest, ListTemplatesParams, Template,
    TemplateGeneration, TemplateVersion, UpdateVersionRequest,
};

const BASE_PATH: &str = "templates";

// Legacy listings use `templates`; dynamic ones use `result`.
#[derive(Deserialize)]
struct TemplatesEnvelope {
    #[serde(alias = "result")]
    templates: Vec<Template>,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    name: &'a str,
}

/// Service for transactional templates and their versions.
#[derive(Debug, Clone)]
pub struct TemplatesService {
    ctx: ServiceContext,
}

impl TemplatesService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Returns a view of this service that sends with `options`.
    #[must_use]
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self::new(self.ctx.with_options(options))
    }

    /// Creates a template.
    #[instrument(skip(self, name))]
    pub async fn create(
        &self,
        name: impl Into<String>,
        generation: TemplateGeneration,
    ) -> SendGridResult<Template> {
        let request = CreateTemplateRequest {
            name: name.into(),
            generation,
        };
        self.ctx.post(BASE_PATH, &request).await
    }

    /// Lists templates.
    #[instrument(skip(self))]
    pub async fn list(&self, params: &ListTemplatesParams) -> SendGridResult<Vec<Template>> {
        let envelope: TemplatesEnvelope = self.ctx.get(BASE_PATH, params.to_query()).await?;
        Ok(envelope.templates)
    }

    /// Gets a template with its versions.
    #[instrument(skip(self))]
    pub async fn get(&self, template_id: &str) -> SendGridResult<Template> {
        require_segment("template_id", template_id)?;
        self.ctx
            .get(&format!("{BASE_PATH}/{template_id}"), Vec::new())
            .await
    }

    /// Renames a template.
    #[instrument(skip(self, name))]
    pub async fn update(&self, template_id: &str, name: &str) -> SendGridResult<Template> {
        require_segment("template_id", template_id)?;
        self.ctx
            .patch(&format!("{BASE_PATH}/{template_id}"), &RenameBody { name })
            .await
    }

    /// Deletes a template.
    #[instrument(skip(self))]
    pub async fn delete(&self, template_id: &str) -> SendGridResult<()> {
        require_segment("template_id", template_id)?;
        self.ctx
            .delete(&format!("{BASE_PATH}/{template_id}"), Vec::new())
            .await
    }

    /// Adds a version to a template.
    #[instrument(skip(self, request), fields(version_name = %request.name))]
    pub async fn create_version(
        &self,
        template_id: &str,
        request: &CreateVersionRequest,
    ) -> SendGridResult<TemplateVersion> {
        require_segment("template_id", template_id)?;
        self.ctx
            .post(&format!("{BASE_PATH}/{template_id}/versions"), request)
            .await
    }

    /// Gets a template version.
    #[instrument(skip(self))]
    pub async fn get_version(
        &self,
        template_id: &str,
        version_id: &str,
    ) -> SendGridResult<TemplateVersion> {
        self.ctx
            .get(&version_path(template_id, version_id)?, Vec::new())
            .await
    }

    /// Partially updates a template version.
    #[instrument(skip(self, request))]
    pub async fn update_version(
        &self,
        template_id: &str,
        version_id: &str,
        request: &UpdateVersionRequest,
    ) -> SendGridResult<TemplateVersion> {
        self.ctx
            .patch(&version_path(template_id, version_id)?, request)
            .await
    }

    /// Deletes a template version.
    #[instrument(skip(self))]
    pub async fn delete_version(&self, template_id: &str, version_id: &str) -> SendGridResult<()> {
        self.ctx
            .delete(&version_path(template_id, version_id)?, Vec::new())
            .await
    }

    /// Makes a version the active one.
    #[instrument(skip(self))]
    pub async fn activate_version(
        &self,
        template_id: &str,
        version_id: &str,
    ) -> SendGridResult<TemplateVersion> {
        let path = format!("{}/activate", version_path(template_id, version_id)?);
        self.ctx.post_empty(&path).await
    }
}

fn version_path(template_id: &str, version_id: &str) -> SendGridResult<String> {
    require_segment("template_id", template_id)?;
    require_segment("version_id", version_id)?;
    Ok(format!("{BASE_PATH}/{template_id}/versions/{version_id}"))
}
