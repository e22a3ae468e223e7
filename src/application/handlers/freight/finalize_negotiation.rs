//! FinalizeNegotiationHandler - Closes a negotiation with the selected carrier.

use std::sync::Arc;

use super::{envelope_for, load_record, publish_after_save, save_record};
use crate::domain::foundation::{CommandMetadata, EventId, FreightId, Timestamp};
use crate::domain::freight::{DerivedMetrics, FreightContracted, FreightError, FreightRecord};
use crate::ports::{EventPublisher, FreightRepository};

/// Command to contract a freight.
///
/// `carrier` must hold a positive proposal on the record.
#[derive(Debug, Clone)]
pub struct FinalizeNegotiationCommand {
    pub freight_id: FreightId,
    pub carrier: String,
    pub final_value: f64,
}

#[derive(Debug, Clone)]
pub struct FinalizeNegotiationResult {
    pub record: FreightRecord,
    pub metrics: DerivedMetrics,
    pub event: FreightContracted,
}

pub struct FinalizeNegotiationHandler {
    repository: Arc<dyn FreightRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl FinalizeNegotiationHandler {
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
        cmd: FinalizeNegotiationCommand,
        metadata: CommandMetadata,
    ) -> Result<FinalizeNegotiationResult, FreightError> {
        let mut record = load_record(self.repository.as_ref(), cmd.freight_id).await?;

        let contracted_at = Timestamp::now();
        record
            .select_proposal(&cmd.carrier)
            .and_then(|selection| record.contract(&selection, cmd.final_value, contracted_at))
            .map_err(|e| {
                let err = FreightError::from(e);
                tracing::warn!(
                    freight_id = %cmd.freight_id,
                    carrier = %cmd.carrier,
                    error = %err,
                    "Rejected finalization"
                );
                err
            })?;

        let record = save_record(self.repository.as_ref(), &record).await?;
        let metrics = record.derived_metrics().ok_or_else(|| {
            FreightError::infrastructure("Contracted freight has no contract terms")
        })?;

        tracing::info!(
            freight_id = %record.id(),
            carrier = %cmd.carrier,
            final_value = metrics.final_value,
            savings = metrics.savings,
            "Freight contracted"
        );

        let event = FreightContracted {
            event_id: EventId::new(),
            freight_id: *record.id(),
            selected_carrier: cmd.carrier,
            proposal_value: metrics.proposal_value,
            final_value: metrics.final_value,
            savings: metrics.savings,
            contracted_at,
        };
        publish_after_save(self.event_publisher.as_ref(), envelope_for(&event, &metadata)).await;

        Ok(FinalizeNegotiationResult {
            record,
            metrics,
            event,
        })
    }
}
