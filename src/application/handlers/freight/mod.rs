//! Freight command handlers, one per operator action.

mod attach_invoice;
mod correct_details;
mod create_quotation;
mod finalize_negotiation;
mod list_freights;
mod load_quotation_form;
mod record_proposal;
mod upload_map_image;

#[cfg(test)]
pub(crate) mod test_support;

pub use attach_invoice::{AttachInvoiceCommand, AttachInvoiceHandler, AttachInvoiceResult};
pub use correct_details::{CorrectDetailsCommand, CorrectDetailsHandler, CorrectDetailsResult};
pub use create_quotation::{
    CreateQuotationCommand, CreateQuotationHandler, CreateQuotationResult,
};
pub use finalize_negotiation::{
    FinalizeNegotiationCommand, FinalizeNegotiationHandler, FinalizeNegotiationResult,
};
pub use list_freights::{ListFreightsHandler, ListFreightsQuery};
pub use load_quotation_form::{LoadQuotationFormHandler, LoadQuotationFormQuery};
pub use record_proposal::{RecordProposalCommand, RecordProposalHandler, RecordProposalResult};
pub use upload_map_image::{UploadMapImageCommand, UploadMapImageHandler, UploadMapImageResult};

use crate::domain::foundation::{CommandMetadata, EventEnvelope, FreightId, SerializableDomainEvent};
use crate::domain::freight::{FreightError, FreightRecord};
use crate::ports::{EventPublisher, FreightRepository};

/// Loads a record or fails with `NotFound`.
pub(crate) async fn load_record(
    repository: &dyn FreightRepository,
    id: FreightId,
) -> Result<FreightRecord, FreightError> {
    match repository.find_by_id(&id).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => {
            tracing::warn!(freight_id = %id, "Freight not found");
            Err(FreightError::not_found(id))
        }
        Err(e) => {
            tracing::error!(freight_id = %id, error = %e, "Failed to load freight");
            Err(e.into())
        }
    }
}

/// Writes the changed record back, logging store failures.
pub(crate) async fn save_record(
    repository: &dyn FreightRepository,
    record: &FreightRecord,
) -> Result<FreightRecord, FreightError> {
    repository.update(record).await.map_err(|e| {
        let err = FreightError::from(e);
        match &err {
            FreightError::Conflict(_) => {
                tracing::warn!(freight_id = %record.id(), "Freight was modified concurrently")
            }
            _ => tracing::error!(freight_id = %record.id(), error = %err, "Failed to save freight"),
        }
        err
    })
}

/// Wraps an event in an envelope carrying the command's context.
pub(crate) fn envelope_for<E: SerializableDomainEvent>(
    event: &E,
    metadata: &CommandMetadata,
) -> EventEnvelope {
    event
        .to_envelope()
        .with_correlation_id(metadata.correlation_id())
        .with_user_id(metadata.user_id.to_string())
}

/// Publishes after a successful write.
///
/// The record is already stored at this point, so a publish failure is
/// logged and does not fail the command.
pub(crate) async fn publish_after_save(publisher: &dyn EventPublisher, envelope: EventEnvelope) {
    let event_type = envelope.event_type.clone();
    let aggregate_id = envelope.aggregate_id.clone();
    if let Err(e) = publisher.publish(envelope).await {
        tracing::error!(
            event_type = %event_type,
            freight_id = %aggregate_id,
            error = %e,
            "Failed to publish freight event"
        );
    }
}
