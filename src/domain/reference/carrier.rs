//! Carriers invited to quote.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::freight::LoadingMode;

/// A trucking company and the loading mode it usually serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub name: String,
    #[serde(rename = "type")]
    pub modality: LoadingMode,
}

impl Carrier {
    pub fn new(name: impl Into<String>, modality: LoadingMode) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self { name, modality })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_modality_as_type() {
        let carrier = Carrier::new("Rodonaves", LoadingMode::Bag).unwrap();
        let json = serde_json::to_value(&carrier).unwrap();
        assert_eq!(json["type"], "bag");
        assert_eq!(json["name"], "Rodonaves");
    }

    #[test]
    fn rejects_blank_name() {
        assert!(Carrier::new("", LoadingMode::Bag).is_err());
    }
}
