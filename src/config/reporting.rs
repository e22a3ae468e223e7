//! Reporting and form defaults

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::freight::DEFAULT_ORIGIN;

#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Origin prefilled on the quotation form
    #[serde(default = "default_origin")]
    pub default_origin: String,
}

impl ReportingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_origin.trim().is_empty() {
            return Err(ValidationError::MissingRequired("reporting.default_origin"));
        }
        Ok(())
    }
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            default_origin: default_origin(),
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}
