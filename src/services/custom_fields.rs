//! Contact database custom fields service.

use serde::Deserialize;
use tracing::instrument;

use super::context::{RequestOptions, ServiceContext};
use crate::errors::{SendGridError, SendGridResult};
use crate::types::custom_fields::{CreateCustomFieldRequest, CustomField, FieldType, ReservedField};

const BASE_PATH: &str = "contactdb/custom_fields";

#[derive(Deserialize)]
struct CustomFieldsEnvelope {
    custom_fields: Vec<CustomField>,
}

#[derive(Deserialize)]
struct ReservedFieldsEnvelope {
    reserved_fields: Vec<ReservedField>,
}

/// Service for recipient custom fields.
#[derive(Debug, Clone)]
pub struct CustomFieldsService {
    ctx: ServiceContext,
}

impl CustomFieldsService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Returns a view of this service that sends with `options`.
    #[must_use]
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self::new(self.ctx.with_options(options))
    }

    /// Creates a custom field.
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, field_type: FieldType) -> SendGridResult<CustomField> {
        if name.trim().is_empty() {
            return Err(SendGridError::validation("Field name is required", "name"));
        }
        self.ctx
            .post(BASE_PATH, &CreateCustomFieldRequest { name, field_type })
            .await
    }

    /// Lists all custom fields.
    #[instrument(skip(self))]
    pub async fn list(&self) -> SendGridResult<Vec<CustomField>> {
        let envelope: CustomFieldsEnvelope = self.ctx.get(BASE_PATH, Vec::new()).await?;
        Ok(envelope.custom_fields)
    }

    /// Gets a custom field.
    #[instrument(skip(self))]
    pub async fn get(&self, field_id: u64) -> SendGridResult<CustomField> {
        self.ctx
            .get(&format!("{BASE_PATH}/{field_id}"), Vec::new())
            .await
    }

    /// Deletes a custom field.
    #[instrument(skip(self))]
    pub async fn delete(&self, field_id: u64) -> SendGridResult<()> {
        self.ctx
            .delete(&format!("{BASE_PATH}/{field_id}"), Vec::new())
            .await
    }

    /// Lists the fields every recipient has.
    #[instrument(skip(self))]
    pub async fn reserved_fields(&self) -> SendGridResult<Vec<ReservedField>> {
        let envelope: ReservedFieldsEnvelope = self
            .ctx
            .get("contactdb/reserved_fields", Vec::new())
            .await?;
        Ok(envelope.reserved_fields)
    }
}
