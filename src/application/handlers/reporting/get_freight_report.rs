//! GetFreightReportHandler - Carrier report with optional state drill-down.

use std::sync::Arc;

use super::load_contracted;
use crate::domain::freight::FreightError;
use crate::domain::reporting::{BrazilianState, FreightReport};
use crate::ports::FreightRepository;

#[derive(Debug, Clone, Copy, Default)]
pub struct GetFreightReportQuery {
    /// Narrow the report to loads delivered in this state.
    pub state: Option<BrazilianState>,
}

pub struct GetFreightReportHandler {
    repository: Arc<dyn FreightRepository>,
}

impl GetFreightReportHandler {
    pub fn new(repository: Arc<dyn FreightRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetFreightReportQuery) -> Result<FreightReport, FreightError> {
        let records = load_contracted(self.repository.as_ref()).await?;
        let report = FreightReport::build(&records, query.state);

        for stats in report.mixed_mode_carriers() {
            tracing::warn!(
                carrier = %stats.carrier,
                section = %stats.loading_mode,
                "Carrier has contracted loads in both loading modes"
            );
        }

        Ok(report)
    }
}
