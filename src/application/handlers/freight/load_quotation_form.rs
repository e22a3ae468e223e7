//! LoadQuotationFormHandler - Builds a blank quotation form from the reference catalog.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::views::QuotationForm;
use crate::domain::freight::FreightError;
use crate::ports::ReferenceCatalog;

#[derive(Debug, Clone)]
pub struct LoadQuotationFormQuery {
    pub today: NaiveDate,
    /// Overrides the form's default origin, usually from `ReportingConfig`.
    pub origin: Option<String>,
}

pub struct LoadQuotationFormHandler {
    catalog: Arc<dyn ReferenceCatalog>,
}

impl LoadQuotationFormHandler {
    pub fn new(catalog: Arc<dyn ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn handle(&self, query: LoadQuotationFormQuery) -> Result<QuotationForm, FreightError> {
        let truck_types = self.catalog.list_truck_types().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load truck types");
            FreightError::from(e)
        })?;
        let carriers = self.catalog.list_carriers().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load carriers");
            FreightError::from(e)
        })?;

        if truck_types.is_empty() || carriers.is_empty() {
            tracing::warn!(
                truck_types = truck_types.len(),
                carriers = carriers.len(),
                "Reference catalog is incomplete"
            );
        }

        let form = QuotationForm::new(truck_types, carriers, query.today);
        Ok(match query.origin {
            Some(origin) => form.with_origin(origin),
            None => form,
        })
    }
}
