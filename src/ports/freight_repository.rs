//! Freight repository port.
//!
//! The record store owns persistence of freight records. Every stored record
//! carries a revision number; `update` only succeeds against the revision the
//! caller read, so two sessions editing the same record cannot silently
//! overwrite each other.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FreightId};
use crate::domain::freight::{FreightRecord, FreightStatus};

/// Repository port for freight record persistence.
#[async_trait]
pub trait FreightRepository: Send + Sync {
    /// Stores a new record and returns it as persisted (version 0).
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if a record with the same id already exists
    /// - `DatabaseError` on persistence failure
    async fn create(&self, record: &FreightRecord) -> Result<FreightRecord, DomainError>;

    /// Replaces a stored record and returns it with the next version.
    ///
    /// # Errors
    ///
    /// - `FreightNotFound` if the record doesn't exist
    /// - `ConcurrencyConflict` if the stored version differs from `record.version()`
    /// - `DatabaseError` on persistence failure
    async fn update(&self, record: &FreightRecord) -> Result<FreightRecord, DomainError>;

    /// Find a record by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &FreightId) -> Result<Option<FreightRecord>, DomainError>;

    /// Records whose status matches exactly, newest first.
    async fn find_by_status(&self, status: FreightStatus) -> Result<Vec<FreightRecord>, DomainError>;

    /// Every record, newest first.
    async fn list(&self) -> Result<Vec<FreightRecord>, DomainError>;
}
