//! Reference catalog port - read-only truck types and carriers.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::reference::{Carrier, TruckType};

#[async_trait]
pub trait ReferenceCatalog: Send + Sync {
    /// All truck types in catalog order.
    async fn list_truck_types(&self) -> Result<Vec<TruckType>, DomainError>;

    /// All carriers in catalog order.
    async fn list_carriers(&self) -> Result<Vec<Carrier>, DomainError>;
}
