//! Contact lists service.

use serde::Deserialize;
use tracing::instrument;

use super::context::{require_segment, RequestOptions, ServiceContext};
use crate::errors::{SendGridError, SendGridResult};
use crate::types::common::PageParams;
use crate::types::lists::{List, ListNameRequest, Recipient};

const BASE_PATH: &str = "contactdb/lists";

#[derive(Deserialize)]
struct ListsEnvelope {
    lists: Vec<List>,
}

#[derive(Deserialize)]
struct RecipientsEnvelope {
    recipients: Vec<Recipient>,
}

/// Service for contact database lists and their membership.
#[derive(Debug, Clone)]
pub struct ListsService {
    ctx: ServiceContext,
}

impl ListsService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Returns a view of this service that sends with `options`.
    #[must_use]
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self::new(self.ctx.with_options(options))
    }

    /// Creates a list.
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> SendGridResult<List> {
        require_name(name)?;
        self.ctx.post(BASE_PATH, &ListNameRequest { name }).await
    }

    /// Lists all lists.
    #[instrument(skip(self))]
    pub async fn list(&self) -> SendGridResult<Vec<List>> {
        let envelope: ListsEnvelope = self.ctx.get(BASE_PATH, Vec::new()).await?;
        Ok(envelope.lists)
    }

    /// Gets a list.
    #[instrument(skip(self))]
    pub async fn get(&self, list_id: u64) -> SendGridResult<List> {
        self.ctx
            .get(&format!("{BASE_PATH}/{list_id}"), Vec::new())
            .await
    }

    /// Renames a list.
    #[instrument(skip(self))]
    pub async fn update(&self, list_id: u64, name: &str) -> SendGridResult<List> {
        require_name(name)?;
        self.ctx
            .patch(&format!("{BASE_PATH}/{list_id}"), &ListNameRequest { name })
            .await
    }

    /// Deletes a list, optionally deleting its recipients too.
    #[instrument(skip(self))]
    pub async fn delete(&self, list_id: u64, delete_contacts: bool) -> SendGridResult<()> {
        self.ctx
            .delete(
                &format!("{BASE_PATH}/{list_id}"),
                vec![("delete_contacts".to_string(), delete_contacts.to_string())],
            )
            .await
    }

    /// Deletes several lists in one call.
    #[instrument(skip(self), fields(count = list_ids.len()))]
    pub async fn delete_many(&self, list_ids: &[u64]) -> SendGridResult<()> {
        if list_ids.is_empty() {
            return Err(SendGridError::validation(
                "At least one list ID is required",
                "list_ids",
            ));
        }
        self.ctx.delete_with_body(BASE_PATH, list_ids).await
    }

    /// Gets one page of a list's recipients.
    #[instrument(skip(self))]
    pub async fn recipients(
        &self,
        list_id: u64,
        page: PageParams,
    ) -> SendGridResult<Vec<Recipient>> {
        let envelope: RecipientsEnvelope = self
            .ctx
            .get(&format!("{BASE_PATH}/{list_id}/recipients"), page.to_query())
            .await?;
        Ok(envelope.recipients)
    }

    /// Adds one recipient to a list.
    #[instrument(skip(self))]
    pub async fn add_recipient(&self, list_id: u64, recipient_id: &str) -> SendGridResult<()> {
        require_segment("recipient_id", recipient_id)?;
        self.ctx
            .post_unit::<()>(
                &format!("{BASE_PATH}/{list_id}/recipients/{recipient_id}"),
                None,
            )
            .await
    }

    /// Adds several recipients to a list.
    #[instrument(skip(self, recipient_ids), fields(count = recipient_ids.len()))]
    pub async fn add_recipients(
        &self,
        list_id: u64,
        recipient_ids: &[String],
    ) -> SendGridResult<()> {
        if recipient_ids.is_empty() {
            return Err(SendGridError::validation(
                "At least one recipient ID is required",
                "recipient_ids",
            ));
        }
        self.ctx
            .post_unit(
                &format!("{BASE_PATH}/{list_id}/recipients"),
                Some(recipient_ids),
            )
            .await
    }

    /// Removes a recipient from a list.
    #[instrument(skip(self))]
    pub async fn remove_recipient(&self, list_id: u64, recipient_id: &str) -> SendGridResult<()> {
        require_segment("recipient_id", recipient_id)?;
        self.ctx
            .delete(
                &format!("{BASE_PATH}/{list_id}/recipients/{recipient_id}"),
                Vec::new(),
            )
            .await
    }
}

fn require_name(name: &str) -> SendGridResult<()> {
    if name.trim().is_empty() {
        return Err(SendGridError::validation("List name is required", "name"));
    }
    Ok(())
}
