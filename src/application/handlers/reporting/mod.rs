//! Reporting query handlers.
//!
//! Read-only handlers over contracted records.

mod get_charts;
mod get_freight_report;

pub use get_charts::{GetChartsHandler, GetChartsQuery};
pub use get_freight_report::{GetFreightReportHandler, GetFreightReportQuery};

use crate::domain::freight::{FreightError, FreightRecord, FreightStatus};
use crate::ports::FreightRepository;

/// Loads every contracted record and logs those whose selected proposal is
/// missing, since they count as zero savings.
async fn load_contracted(repository: &dyn FreightRepository) -> Result<Vec<FreightRecord>, FreightError> {
    let records = repository
        .find_by_status(FreightStatus::Contracted)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load contracted freights");
            FreightError::from(e)
        })?;

    for record in records.iter().filter(|r| r.selected_proposal().is_none()) {
        tracing::warn!(
            freight_id = %record.id(),
            carrier = record.selected_carrier().unwrap_or_default(),
            "Contracted freight has no positive proposal for its carrier"
        );
    }
    Ok(records)
}
