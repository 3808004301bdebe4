//! Contact database segments service.

use serde::Deserialize;
use tracing::instrument;

use super::context::{RequestOptions, ServiceContext};
use crate::errors::{SendGridError, SendGridResult};
use crate::types::common::PageParams;
use crate::types::lists::Recipient;
use crate::types::segments::{CreateSegmentRequest, Segment, UpdateSegmentRequest};

const BASE_PATH: &str = "contactdb/segments";

#[derive(Deserialize)]
struct SegmentsEnvelope {
    segments: Vec<Segment>,
}

#[derive(Deserialize)]
struct RecipientsEnvelope {
    recipients: Vec<Recipient>,
}

/// Service for saved recipient searches.
#[derive(Debug, Clone)]
pub struct SegmentsService {
    ctx: ServiceContext,
}

impl SegmentsService {
    pub(crate) fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Returns a view of this service that sends with `options`.
    #[must_use]
    pub fn with_options(&self, options: RequestOptions) -> Self {
        Self::new(self.ctx.with_options(options))
    }

    /// Creates a segment.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: &CreateSegmentRequest) -> SendGridResult<Segment> {
        if request.name.trim().is_empty() {
            return Err(SendGridError::validation("Segment name is required", "name"));
        }
        if request.conditions.is_empty() {
            return Err(SendGridError::validation(
                "At least one condition is required",
                "conditions",
            ));
        }
        self.ctx.post(BASE_PATH, request).await
    }

    /// Lists all segments.
    #[instrument(skip(self))]
    pub async fn list(&self) -> SendGridResult<Vec<Segment>> {
        let envelope: SegmentsEnvelope = self.ctx.get(BASE_PATH, Vec::new()).await?;
        Ok(envelope.segments)
    }

    /// Gets a segment.
    #[instrument(skip(self))]
    pub async fn get(&self, segment_id: u64) -> SendGridResult<Segment> {
        self.ctx
            .get(&format!("{BASE_PATH}/{segment_id}"), Vec::new())
            .await
    }

    /// Partially updates a segment.
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        segment_id: u64,
        request: &UpdateSegmentRequest,
    ) -> SendGridResult<Segment> {
        self.ctx
            .patch(&format!("{BASE_PATH}/{segment_id}"), request)
            .await
    }

    /// Deletes a segment, optionally deleting its recipients too.
    #[instrument(skip(self))]
    pub async fn delete(&self, segment_id: u64, delete_contacts: bool) -> SendGridResult<()> {
        self.ctx
            .delete(
                &format!("{BASE_PATH}/{segment_id}"),
                vec![("delete_contacts".to_string(), delete_contacts.to_string())],
            )
            .await
    }

    /// Gets one page of the recipients matching a segment.
    #[instrument(skip(self))]
    pub async fn recipients(
        &self,
        segment_id: u64,
        page: PageParams,
    ) -> SendGridResult<Vec<Recipient>> {
        let envelope: RecipientsEnvelope = self
            .ctx
            .get(
                &format!("{BASE_PATH}/{segment_id}/recipients"),
                page.to_query(),
            )
            .await?;
        Ok(envelope.recipients)
    }
}
