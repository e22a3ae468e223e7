//! CreateQuotationHandler - Opens a new freight record from the quotation form.

use std::sync::Arc;

use super::{envelope_for, publish_after_save};
use crate::domain::foundation::{CommandMetadata, EventId, FreightId};
use crate::domain::freight::{FreightError, FreightQuoted, FreightRecord, QuotationRequest};
use crate::ports::{EventPublisher, FreightRepository};

/// Command to open a freight record.
#[derive(Debug, Clone)]
pub struct CreateQuotationCommand {
    pub request: QuotationRequest,
}

/// Result of a successful quotation.
#[derive(Debug, Clone)]
pub struct CreateQuotationResult {
    pub record: FreightRecord,
    pub event: FreightQuoted,
}

/// Handler for the quotation form's submit action.
pub struct CreateQuotationHandler {
    repository: Arc<dyn FreightRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateQuotationHandler {
    pub fn new(
        repository: Arc<dyn FreightRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateQuotationCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateQuotationResult, FreightError> {
        // 1. Validate and build the aggregate
        let record = FreightRecord::open(FreightId::new(), cmd.request).map_err(|e| {
            let err = FreightError::from(e);
            tracing::warn!(error = %err, "Rejected quotation");
            err
        })?;

        // 2. Persist
        let record = self.repository.create(&record).await.map_err(|e| {
            tracing::error!(freight_id = %record.id(), error = %e, "Failed to store quotation");
            FreightError::from(e)
        })?;

        tracing::info!(
            freight_id = %record.id(),
            map_number = %record.map_number(),
            carriers = record.carrier_proposals().len(),
            "Freight quoted"
        );

        // 3. Publish
        let event = FreightQuoted {
            event_id: EventId::new(),
            freight_id: *record.id(),
            map_number: record.map_number().to_string(),
            destination: record.destination().to_string(),
            loading_mode: record.loading_mode(),
            map_value: record.map_value(),
            carriers: record.carrier_proposals().keys().cloned().collect(),
            quoted_at: *record.created_at(),
        };
        publish_after_save(self.event_publisher.as_ref(), envelope_for(&event, &metadata)).await;

        Ok(CreateQuotationResult { record, event })
    }
}
