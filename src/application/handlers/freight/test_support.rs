//! Test doubles shared by the freight handler tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::adapters::{InMemoryEventBus, InMemoryFreightRepository};
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, FreightId};
use crate::domain::freight::{FreightRecord, FreightStatus};
use crate::ports::{EventPublisher, FreightRepository};

/// Wraps the in-memory store, counting writes and optionally failing them.
#[derive(Default)]
pub struct SpyRepository {
    inner: InMemoryFreightRepository,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl SpyRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn seeded(record: &FreightRecord) -> Arc<Self> {
        let repo = Self::new();
        repo.inner.create(record).await.unwrap();
        repo
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub async fn stored(&self, id: &FreightId) -> FreightRecord {
        self.inner.find_by_id(id).await.unwrap().unwrap()
    }

    fn write_attempt(&self) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated write failure",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl FreightRepository for SpyRepository {
    async fn create(&self, record: &FreightRecord) -> Result<FreightRecord, DomainError> {
        self.write_attempt()?;
        self.inner.create(record).await
    }

    async fn update(&self, record: &FreightRecord) -> Result<FreightRecord, DomainError> {
        self.write_attempt()?;
        self.inner.update(record).await
    }

    async fn find_by_id(&self, id: &FreightId) -> Result<Option<FreightRecord>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_status(&self, status: FreightStatus) -> Result<Vec<FreightRecord>, DomainError> {
        self.inner.find_by_status(status).await
    }

    async fn list(&self) -> Result<Vec<FreightRecord>, DomainError> {
        self.inner.list().await
    }
}

/// Publisher that always fails.
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
        Err(DomainError::new(
            ErrorCode::InternalError,
            "Simulated publish failure",
        ))
    }

    async fn publish_all(&self, _events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        Err(DomainError::new(
            ErrorCode::InternalError,
            "Simulated publish failure",
        ))
    }
}

pub fn event_bus() -> Arc<InMemoryEventBus> {
    Arc::new(InMemoryEventBus::new())
}
