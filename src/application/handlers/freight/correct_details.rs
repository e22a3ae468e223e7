//! CorrectDetailsHandler - Edits loading date, map value and weight before contracting.

use std::sync::Arc;

use super::{envelope_for, load_record, publish_after_save, save_record};
use crate::domain::foundation::{CommandMetadata, EventId, FreightId, Timestamp};
use crate::domain::freight::{DetailsCorrection, FreightDetailsCorrected, FreightError, FreightRecord};
use crate::ports::{EventPublisher, FreightRepository};

#[derive(Debug, Clone)]
pub struct CorrectDetailsCommand {
    pub freight_id: FreightId,
    pub correction: DetailsCorrection,
}

/// `event` is `None` when the edit changed nothing and the store was not called.
#[derive(Debug, Clone)]
pub struct CorrectDetailsResult {
    pub record: FreightRecord,
    pub event: Option<FreightDetailsCorrected>,
}

impl CorrectDetailsResult {
    pub fn changed(&self) -> bool {
        self.event.is_some()
    }
}

pub struct CorrectDetailsHandler {
    repository: Arc<dyn FreightRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CorrectDetailsHandler {
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
        cmd: CorrectDetailsCommand,
        metadata: CommandMetadata,
    ) -> Result<CorrectDetailsResult, FreightError> {
        let mut record = load_record(self.repository.as_ref(), cmd.freight_id).await?;

        let changed = record.correct_details(&cmd.correction).map_err(|e| {
            let err = FreightError::from(e);
            tracing::warn!(freight_id = %cmd.freight_id, error = %err, "Rejected details correction");
            err
        })?;

        if !changed {
            tracing::debug!(freight_id = %cmd.freight_id, "Details correction changed nothing");
            return Ok(CorrectDetailsResult {
                record,
                event: None,
            });
        }

        let record = save_record(self.repository.as_ref(), &record).await?;
        tracing::info!(freight_id = %record.id(), "Freight details corrected");

        let event = FreightDetailsCorrected {
            event_id: EventId::new(),
            freight_id: *record.id(),
            loading_date: record.loading_date(),
            map_value: record.map_value(),
            weight: record.weight(),
            corrected_at: Timestamp::now(),
        };
        publish_after_save(self.event_publisher.as_ref(), envelope_for(&event, &metadata)).await;

        Ok(CorrectDetailsResult {
            record,
            event: Some(event),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::freight::test_support::{event_bus, SpyRepository};
    use crate::domain::freight::fixtures::{at, contracted, negotiating};
    use crate::domain::freight::LoadingMode;
    use chrono::NaiveDate;

    fn correction() -> DetailsCorrection {
        DetailsCorrection {
            loading_date: NaiveDate::from_ymd_opt(2024, 2, 1),
            map_value: Some(1200.0),
            weight: Some(9_500.0),
        }
    }

    #[tokio::test]
    async fn applies_correction_and_publishes() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        let bus = event_bus();
        let handler = CorrectDetailsHandler::new(repo.clone(), bus.clone());

        let result = handler
            .handle(
                CorrectDetailsCommand { freight_id: *record.id(), correction: correction() },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert!(result.changed());
        let stored = repo.stored(record.id()).await;
        assert_eq!(stored.map_value(), 1200.0);
        assert_eq!(stored.weight(), 9_500.0);
        assert_eq!(stored.loading_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(bus.has_event("freight.details_corrected.v1").await);
    }

    #[tokio::test]
    async fn same_values_twice_is_idempotent() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        let bus = event_bus();
        let handler = CorrectDetailsHandler::new(repo.clone(), bus.clone());
        let cmd = CorrectDetailsCommand { freight_id: *record.id(), correction: correction() };

        handler.handle(cmd.clone(), CommandMetadata::test_fixture()).await.unwrap();
        let after_first = repo.stored(record.id()).await;
        let second = handler.handle(cmd, CommandMetadata::test_fixture()).await.unwrap();

        assert!(!second.changed());
        assert_eq!(repo.writes(), 1);
        assert_eq!(bus.event_count().await, 1);
        assert_eq!(repo.stored(record.id()).await, after_first);
    }

    #[tokio::test]
    async fn empty_correction_skips_store() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        let handler = CorrectDetailsHandler::new(repo.clone(), event_bus());

        let result = handler
            .handle(
                CorrectDetailsCommand {
                    freight_id: *record.id(),
                    correction: DetailsCorrection::default(),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert!(!result.changed());
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn rejects_non_positive_map_value() {
        let record = negotiating();
        let repo = SpyRepository::seeded(&record).await;
        let handler = CorrectDetailsHandler::new(repo.clone(), event_bus());

        let err = handler
            .handle(
                CorrectDetailsCommand {
                    freight_id: *record.id(),
                    correction: DetailsCorrection { map_value: Some(0.0), ..Default::default() },
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FreightError::ValidationFailed { ref field, .. } if field == "map_value"));
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn contracted_record_cannot_be_corrected() {
        let record = contracted("A", 900.0, 850.0, 1000.0, "Bauru/SP", LoadingMode::Bag, at(2024, 1, 1));
        let repo = SpyRepository::seeded(&record).await;
        let handler = CorrectDetailsHandler::new(repo.clone(), event_bus());

        let err = handler
            .handle(
                CorrectDetailsCommand { freight_id: *record.id(), correction: correction() },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FreightError::InvalidState(_)));
    }
}
