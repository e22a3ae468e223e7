//! Quotation input: everything the operator submits to open a freight map.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LoadingMode;
use crate::domain::foundation::ValidationError;

/// Origin used when the quotation form does not override it.
pub const DEFAULT_ORIGIN: &str = "Pederneiras/SP";

/// Validated input for opening a new freight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRequest {
    pub map_number: String,
    pub origin: String,
    pub destination: String,
    pub total_km: f64,
    pub weight: f64,
    pub map_value: f64,
    pub truck_type: String,
    pub loading_mode: LoadingMode,
    pub route_info: Option<String>,
    pub map_image_url: Option<String>,
    pub loading_date: NaiveDate,
    /// Carriers invited to quote. Becomes the fixed key set of the proposals.
    pub carriers: Vec<String>,
}

impl QuotationRequest {
    /// Checks every required field before anything reaches the record store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("map_number", &self.map_number)?;
        require_text("destination", &self.destination)?;
        require_non_negative("total_km", self.total_km)?;
        require_non_negative("weight", self.weight)?;
        require_positive("map_value", self.map_value)?;
        require_text("truck_type", &self.truck_type)?;

        if self.invited_carriers().is_empty() {
            return Err(ValidationError::empty_field("carriers"));
        }
        Ok(())
    }

    /// Carrier names with blanks and duplicates removed, in submission order.
    pub fn invited_carriers(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for carrier in &self.carriers {
            let name = carrier.trim();
            if !name.is_empty() && !seen.iter().any(|c: &String| c == name) {
                seen.push(name.to_string());
            }
        }
        seen
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::negative(field, value));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::not_positive(field, value));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_request() -> QuotationRequest {
    QuotationRequest {
        map_number: "MAP-001".to_string(),
        origin: DEFAULT_ORIGIN.to_string(),
        destination: "Sorocaba/SP".to_string(),
        total_km: 250.0,
        weight: 12_000.0,
        map_value: 1000.0,
        truck_type: "Carreta".to_string(),
        loading_mode: LoadingMode::Paletizados,
        route_info: None,
        map_image_url: None,
        loading_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        carriers: vec!["A".to_string(), "B".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_request_is_valid() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn rejects_blank_map_number() {
        let mut request = sample_request();
        request.map_number = "  ".to_string();
        assert_eq!(
            request.validate(),
            Err(ValidationError::empty_field("map_number"))
        );
    }

    #[test]
    fn rejects_missing_destination_and_truck_type() {
        let mut request = sample_request();
        request.destination.clear();
        assert!(request.validate().is_err());

        let mut request = sample_request();
        request.truck_type.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn zero_km_and_weight_are_accepted() {
        let mut request = sample_request();
        request.total_km = 0.0;
        request.weight = 0.0;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn negative_or_nan_km_is_rejected() {
        let mut request = sample_request();
        request.total_km = -1.0;
        assert!(request.validate().is_err());

        request.total_km = f64::NAN;
        assert!(request.validate().is_err());
    }

    #[test]
    fn map_value_must_be_positive() {
        let mut request = sample_request();
        request.map_value = 0.0;
        assert!(matches!(
            request.validate(),
            Err(ValidationError::NotPositive { .. })
        ));
    }

    #[test]
    fn requires_at_least_one_carrier() {
        let mut request = sample_request();
        request.carriers = vec!["".to_string(), " ".to_string()];
        assert_eq!(request.validate(), Err(ValidationError::empty_field("carriers")));
    }

    #[test]
    fn invited_carriers_drops_blanks_and_duplicates() {
        let mut request = sample_request();
        request.carriers = vec![
            "A".to_string(),
            "".to_string(),
            "B".to_string(),
            " A ".to_string(),
        ];
        assert_eq!(request.invited_carriers(), vec!["A", "B"]);
    }
}
