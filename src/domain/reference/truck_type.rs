//! Truck types offered on the quotation form.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::freight::LoadingMode;

/// A truck body the operator can request, tied to one loading mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckType {
    pub name: String,
    /// Payload in kilograms.
    pub capacity: f64,
    pub modality: LoadingMode,
}

impl TruckType {
    pub fn new(
        name: impl Into<String>,
        capacity: f64,
        modality: LoadingMode,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(ValidationError::negative("capacity", capacity));
        }
        Ok(Self {
            name,
            capacity,
            modality,
        })
    }

    pub fn fits(&self, weight: f64) -> bool {
        weight <= self.capacity
    }
}

/// Truck types serving `mode`, in catalog order.
pub fn truck_types_for(types: &[TruckType], mode: LoadingMode) -> Vec<&TruckType> {
    types.iter().filter(|t| t.modality == mode).collect()
}
