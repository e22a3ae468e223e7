//! GetChartsHandler - Builds every series of the charts page.

use std::sync::Arc;

use super::load_contracted;
use crate::domain::freight::FreightError;
use crate::domain::reporting::ChartsDashboard;
use crate::ports::FreightRepository;

#[derive(Debug, Clone, Copy, Default)]
pub struct GetChartsQuery;

pub struct GetChartsHandler {
    repository: Arc<dyn FreightRepository>,
}

impl GetChartsHandler {
    pub fn new(repository: Arc<dyn FreightRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, _query: GetChartsQuery) -> Result<ChartsDashboard, FreightError> {
        let records = load_contracted(self.repository.as_ref()).await?;
        let charts = ChartsDashboard::build(&records);
        tracing::debug!(total_freight = charts.total_freight, "Charts built");
        Ok(charts)
    }
}
