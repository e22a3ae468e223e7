//! RecordProposalHandler - Saves a carrier's quoted price on the negotiation board.

use std::sync::Arc;

use super::{envelope_for, load_record, publish_after_save, save_record};
use crate::domain::foundation::{CommandMetadata, EventId, FreightId, Timestamp};
use crate::domain::freight::{FreightError, FreightRecord, ProposalRecorded};
use crate::ports::{EventPublisher, FreightRepository};

/// Command to record one carrier's proposal.
#[derive(Debug, Clone)]
pub struct RecordProposalCommand {
    pub freight_id: FreightId,
    pub carrier: String,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct RecordProposalResult {
    pub record: FreightRecord,
    pub event: ProposalRecorded,
}

pub struct RecordProposalHandler {
    repository: Arc<dyn FreightRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RecordProposalHandler {
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
        cmd: RecordProposalCommand,
        metadata: CommandMetadata,
    ) -> Result<RecordProposalResult, FreightError> {
        // Non-positive input is dropped before touching the store.
        if !cmd.value.is_finite() || cmd.value <= 0.0 {
            tracing::warn!(
                freight_id = %cmd.freight_id,
                carrier = %cmd.carrier,
                value = cmd.value,
                "Rejected non-positive proposal"
            );
            return Err(FreightError::validation(
                "proposal_value",
                "Proposal must be greater than zero",
            ));
        }

        let mut record = load_record(self.repository.as_ref(), cmd.freight_id).await?;
        let previous_value = record
            .carrier_proposals()
            .get(&cmd.carrier)
            .copied()
            .unwrap_or(0.0);

        record.record_proposal(&cmd.carrier, cmd.value).map_err(|e| {
            let err = FreightError::from(e);
            tracing::warn!(freight_id = %cmd.freight_id, error = %err, "Rejected proposal");
            err
        })?;

        let record = save_record(self.repository.as_ref(), &record).await?;
        tracing::info!(
            freight_id = %record.id(),
            carrier = %cmd.carrier,
            value = cmd.value,
            "Proposal recorded"
        );

        let event = ProposalRecorded {
            event_id: EventId::new(),
            freight_id: *record.id(),
            carrier: cmd.carrier,
            previous_value,
            value: cmd.value,
            recorded_at: Timestamp::now(),
        };
        publish_after_save(self.event_publisher.as_ref(), envelope_for(&event, &metadata)).await;

        Ok(RecordProposalResult { record, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::freight::test_support::{event_bus, SpyRepository};
    use crate::domain::freight::fixtures::{at, contracted, negotiating};
    use crate::domain::freight::LoadingMode;

    fn command(freight_id: FreightId, carrier: &str, value: f64) -> RecordProposalCommand {
        RecordProposalCommand {
            freight_id,
            carrier: carrier.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn records_positive_proposal() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        let bus = event_bus();
        let handler = RecordProposalHandler::new(repo.clone(), bus.clone());

        let result = handler
            .handle(command(*record.id(), "A", 900.0), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.record.carrier_proposals()["A"], 900.0);
        assert_eq!(result.record.version(), 1);
        assert_eq!(result.event.previous_value, 0.0);
        assert!(bus.has_event("freight.proposal_recorded.v1").await);
    }

    #[tokio::test]
    async fn overwrites_previous_proposal() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        let handler = RecordProposalHandler::new(repo.clone(), event_bus());

        handler
            .handle(command(*record.id(), "B", 700.0), CommandMetadata::test_fixture())
            .await
            .unwrap();
        let second = handler
            .handle(command(*record.id(), "B", 650.0), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(second.event.previous_value, 700.0);
        assert_eq!(repo.stored(record.id()).await.carrier_proposals()["B"], 650.0);
    }

    #[tokio::test]
    async fn non_positive_value_skips_the_store() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        let bus = event_bus();
        let handler = RecordProposalHandler::new(repo.clone(), bus.clone());

        for value in [0.0, -10.0, f64::NAN] {
            let err = handler
                .handle(command(*record.id(), "A", value), CommandMetadata::test_fixture())
                .await
                .unwrap_err();
            assert_eq!(err.code(), crate::domain::foundation::ErrorCode::ValidationFailed);
        }

        assert_eq!(repo.writes(), 0);
        assert_eq!(bus.event_count().await, 0);
        assert_eq!(repo.stored(record.id()).await, record);
    }

    #[tokio::test]
    async fn uninvited_carrier_is_rejected() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        let handler = RecordProposalHandler::new(repo.clone(), event_bus());

        let err = handler
            .handle(command(*record.id(), "Z", 500.0), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err, FreightError::UnknownCarrier("Z".to_string()));
        assert!(!repo.stored(record.id()).await.carrier_proposals().contains_key("Z"));
    }

    #[tokio::test]
    async fn contracted_record_is_read_only() {
        let record = contracted("A", 900.0, 850.0, 1000.0, "Bauru/SP", LoadingMode::Bag, at(2024, 1, 1));
        let repo = SpyRepository::seeded(&record).await;
        let handler = RecordProposalHandler::new(repo.clone(), event_bus());

        let err = handler
            .handle(command(*record.id(), "A", 100.0), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, FreightError::InvalidState(_)));
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let handler = RecordProposalHandler::new(SpyRepository::new(), event_bus());
        let id = FreightId::new();

        let err = handler
            .handle(command(id, "A", 100.0), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err, FreightError::NotFound(id));
    }

    #[tokio::test]
    async fn store_failure_leaves_record_unchanged() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        repo.fail_writes();
        let handler = RecordProposalHandler::new(repo.clone(), event_bus());

        let err = handler
            .handle(command(*record.id(), "A", 900.0), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, FreightError::Infrastructure(_)));
        assert_eq!(repo.stored(record.id()).await.carrier_proposals()["A"], 0.0);
    }
}
