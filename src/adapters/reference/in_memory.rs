//! In-memory reference catalog.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::reference::{Carrier, TruckType};
use crate::ports::ReferenceCatalog;

/// Fixed truck types and carriers, returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceCatalog {
    truck_types: Arc<Vec<TruckType>>,
    carriers: Arc<Vec<Carrier>>,
}

impl InMemoryReferenceCatalog {
    pub fn new(truck_types: Vec<TruckType>, carriers: Vec<Carrier>) -> Self {
        Self {
            truck_types: Arc::new(truck_types),
            carriers: Arc::new(carriers),
        }
    }
}

#[async_trait]
impl ReferenceCatalog for InMemoryReferenceCatalog {
    async fn list_truck_types(&self) -> Result<Vec<TruckType>, DomainError> {
        Ok(self.truck_types.as_ref().clone())
    }

    async fn list_carriers(&self) -> Result<Vec<Carrier>, DomainError> {
        Ok(self.carriers.as_ref().clone())
    }
}
