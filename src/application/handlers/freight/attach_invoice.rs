//! AttachInvoiceHandler - Uploads an invoice and appends its URL to a contracted freight.

use std::sync::Arc;

use super::{envelope_for, load_record, publish_after_save, save_record};
use crate::domain::foundation::{CommandMetadata, EventId, FreightId, Timestamp};
use crate::domain::freight::{FreightError, FreightRecord, FreightStatus, InvoiceAttached};
use crate::ports::{EventPublisher, FileStorage, FileUpload, FreightRepository};

#[derive(Debug, Clone)]
pub struct AttachInvoiceCommand {
    pub freight_id: FreightId,
    pub file: FileUpload,
}

#[derive(Debug, Clone)]
pub struct AttachInvoiceResult {
    pub record: FreightRecord,
    pub event: InvoiceAttached,
}

pub struct AttachInvoiceHandler {
    repository: Arc<dyn FreightRepository>,
    file_storage: Arc<dyn FileStorage>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AttachInvoiceHandler {
    pub fn new(
        repository: Arc<dyn FreightRepository>,
        file_storage: Arc<dyn FileStorage>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            file_storage,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: AttachInvoiceCommand,
        metadata: CommandMetadata,
    ) -> Result<AttachInvoiceResult, FreightError> {
        let mut record = load_record(self.repository.as_ref(), cmd.freight_id).await?;

        // Checked before uploading so no orphan file is left behind.
        if record.status() != FreightStatus::Contracted {
            tracing::warn!(freight_id = %cmd.freight_id, "Invoice upload for a freight still negotiating");
            return Err(FreightError::invalid_state(
                "Invoices can only be attached to contracted freight",
            ));
        }

        let stored = self.file_storage.upload(cmd.file).await.map_err(|e| {
            if e.is_rejection() {
                tracing::warn!(freight_id = %cmd.freight_id, error = %e, "Rejected invoice file");
            } else {
                tracing::error!(freight_id = %cmd.freight_id, error = %e, "Invoice upload failed");
            }
            FreightError::from(e)
        })?;

        record.attach_invoice(stored.url.clone())?;
        let record = save_record(self.repository.as_ref(), &record).await?;
        tracing::info!(
            freight_id = %record.id(),
            invoice_count = record.invoice_urls().len(),
            "Invoice attached"
        );

        let event = InvoiceAttached {
            event_id: EventId::new(),
            freight_id: *record.id(),
            invoice_url: stored.url,
            invoice_count: record.invoice_urls().len(),
            attached_at: Timestamp::now(),
        };
        publish_after_save(self.event_publisher.as_ref(), envelope_for(&event, &metadata)).await;

        Ok(AttachInvoiceResult { record, event })
    }
}
