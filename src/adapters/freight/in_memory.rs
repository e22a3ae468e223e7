//! In-Memory Freight Repository
//!
//! Keeps freight records in a map. Used by tests and by the demo binary when
//! no records file is configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, FreightId};
use crate::domain::freight::{FreightRecord, FreightStatus};
use crate::ports::FreightRepository;

/// In-memory record store with version checks on update.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFreightRepository {
    records: Arc<RwLock<HashMap<FreightId, FreightRecord>>>,
}

impl InMemoryFreightRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

pub(super) fn not_found(id: &FreightId) -> DomainError {
    DomainError::new(ErrorCode::FreightNotFound, format!("Freight not found: {}", id))
        .with_detail("freight_id", id.to_string())
}

pub(super) fn conflict(id: &FreightId, expected: u64, actual: u64) -> DomainError {
    DomainError::new(
        ErrorCode::ConcurrencyConflict,
        format!(
            "Freight {} is at version {}, update was based on version {}",
            id, actual, expected
        ),
    )
    .with_detail("freight_id", id.to_string())
}

/// Newest first; id breaks ties so listings are stable.
pub(super) fn sort_newest_first(records: &mut [FreightRecord]) {
    records.sort_by(|a, b| {
        b.created_at()
            .cmp(a.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}

#[async_trait]
impl FreightRepository for InMemoryFreightRepository {
    async fn create(&self, record: &FreightRecord) -> Result<FreightRecord, DomainError> {
        let mut records = self.records.write().await;
        if let Some(existing) = records.get(record.id()) {
            return Err(conflict(record.id(), record.version(), existing.version()));
        }
        let stored = record.clone().with_version(0);
        records.insert(*stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, record: &FreightRecord) -> Result<FreightRecord, DomainError> {
        let mut records = self.records.write().await;
        let current = records
            .get(record.id())
            .map(FreightRecord::version)
            .ok_or_else(|| not_found(record.id()))?;
        if current != record.version() {
            return Err(conflict(record.id(), record.version(), current));
        }
        let stored = record.clone().with_version(current + 1);
        records.insert(*stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &FreightId) -> Result<Option<FreightRecord>, DomainError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find_by_status(&self, status: FreightStatus) -> Result<Vec<FreightRecord>, DomainError> {
        let mut matching: Vec<FreightRecord> = self
            .records
            .read()
            .await
            .values()
            .filter(|record| record.status() == status)
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        Ok(matching)
    }

    async fn list(&self) -> Result<Vec<FreightRecord>, DomainError> {
        let mut all: Vec<FreightRecord> = self.records.read().await.values().cloned().collect();
        sort_newest_first(&mut all);
        Ok(all)
    }
}
