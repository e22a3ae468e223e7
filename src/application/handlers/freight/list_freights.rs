//! ListFreightsHandler - Loads the records behind the negotiation board and the ledger.

use std::sync::Arc;

use crate::domain::freight::{FreightError, FreightRecord, FreightStatus};
use crate::ports::FreightRepository;

/// `status: None` lists every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFreightsQuery {
    pub status: Option<FreightStatus>,
}

impl ListFreightsQuery {
    pub fn negotiating() -> Self {
        Self {
            status: Some(FreightStatus::Negotiating),
        }
    }

    pub fn contracted() -> Self {
        Self {
            status: Some(FreightStatus::Contracted),
        }
    }
}

pub struct ListFreightsHandler {
    repository: Arc<dyn FreightRepository>,
}

impl ListFreightsHandler {
    pub fn new(repository: Arc<dyn FreightRepository>) -> Self {
        Self { repository }
    }

    /// Records newest first.
    pub async fn handle(&self, query: ListFreightsQuery) -> Result<Vec<FreightRecord>, FreightError> {
        let result = match query.status {
            Some(status) => self.repository.find_by_status(status).await,
            None => self.repository.list().await,
        };
        result.map_err(|e| {
            tracing::error!(status = ?query.status, error = %e, "Failed to list freights");
            FreightError::from(e)
        })
    }
}
