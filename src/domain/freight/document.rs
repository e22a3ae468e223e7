//! Store document shape of a freight record.
//!
//! Records come back from the store as loosely-typed JSON. `FreightDocument`
//! mirrors that camelCase shape, and `FreightRecord::try_from` is the single
//! place where a document is accepted or rejected.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::aggregate::{ContractTerms, FreightRecord};
use super::quotation::require_non_negative;
use super::{FreightStatus, LoadingMode};
use crate::domain::foundation::{FreightId, Timestamp, ValidationError};

/// Reasons a stored document cannot become a `FreightRecord`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordDecodeError {
    #[error("record {id}: {source}")]
    InvalidField {
        id: FreightId,
        #[source]
        source: ValidationError,
    },

    #[error("record {id} is contracted but has no {field}")]
    MissingContractTerm { id: FreightId, field: &'static str },

    #[error("record {id} is negotiating but already has {field}")]
    UnexpectedContractTerm { id: FreightId, field: &'static str },
}

impl RecordDecodeError {
    pub fn freight_id(&self) -> &FreightId {
        match self {
            RecordDecodeError::InvalidField { id, .. }
            | RecordDecodeError::MissingContractTerm { id, .. }
            | RecordDecodeError::UnexpectedContractTerm { id, .. } => id,
        }
    }
}

/// Wire shape of a freight record.
///
/// Optional fields read both a missing key and an explicit `null` as their
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightDocument {
    pub id: FreightId,
    pub map_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination: String,
    /// Missing distance reads as 0.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_km: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f64,
    pub map_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub truck_type: String,
    pub loading_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_image_url: Option<String>,
    pub loading_date: NaiveDate,
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub carrier_proposals: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contracted_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub invoice_urls: Vec<String>,
    #[serde(default = "Timestamp::epoch")]
    pub created_at: Timestamp,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&FreightRecord> for FreightDocument {
    fn from(record: &FreightRecord) -> Self {
        let contract = record.contract.as_ref();
        Self {
            id: record.id,
            map_number: record.map_number.clone(),
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            total_km: record.total_km,
            weight: record.weight,
            map_value: record.map_value,
            truck_type: record.truck_type.clone(),
            loading_mode: record.loading_mode.as_str().to_string(),
            route_info: record.route_info.clone(),
            map_image_url: record.map_image_url.clone(),
            loading_date: record.loading_date,
            status: record.status.as_str().to_string(),
            carrier_proposals: record.carrier_proposals.clone(),
            selected_carrier: contract.map(|c| c.selected_carrier.clone()),
            final_value: contract.map(|c| c.final_value),
            contracted_at: contract.map(|c| c.contracted_at),
            invoice_urls: record.invoice_urls.clone(),
            created_at: record.created_at,
            version: record.version,
        }
    }
}

impl TryFrom<FreightDocument> for FreightRecord {
    type Error = RecordDecodeError;

    fn try_from(doc: FreightDocument) -> Result<Self, Self::Error> {
        let id = doc.id;
        let invalid = |source: ValidationError| RecordDecodeError::InvalidField { id, source };

        if doc.map_number.trim().is_empty() {
            return Err(invalid(ValidationError::empty_field("mapNumber")));
        }
        require_non_negative("totalKm", doc.total_km).map_err(invalid)?;
        require_non_negative("weight", doc.weight).map_err(invalid)?;
        require_non_negative("mapValue", doc.map_value).map_err(invalid)?;
        for value in doc.carrier_proposals.values() {
            require_non_negative("carrierProposals", *value).map_err(invalid)?;
        }

        let status: FreightStatus = doc.status.parse().map_err(invalid)?;
        let loading_mode: LoadingMode = doc.loading_mode.parse().map_err(invalid)?;

        let contract = match status {
            FreightStatus::Contracted => {
                let selected_carrier = doc.selected_carrier.ok_or(
                    RecordDecodeError::MissingContractTerm {
                        id,
                        field: "selectedCarrier",
                    },
                )?;
                let final_value = doc.final_value.ok_or(RecordDecodeError::MissingContractTerm {
                    id,
                    field: "finalValue",
                })?;
                let contracted_at =
                    doc.contracted_at
                        .ok_or(RecordDecodeError::MissingContractTerm {
                            id,
                            field: "contractedAt",
                        })?;
                require_non_negative("finalValue", final_value).map_err(invalid)?;
                Some(ContractTerms {
                    selected_carrier,
                    final_value,
                    contracted_at,
                })
            }
            FreightStatus::Negotiating => {
                let stray = [
                    ("selectedCarrier", doc.selected_carrier.is_some()),
                    ("finalValue", doc.final_value.is_some()),
                    ("contractedAt", doc.contracted_at.is_some()),
                ]
                .into_iter()
                .find(|(_, present)| *present);
                if let Some((field, _)) = stray {
                    return Err(RecordDecodeError::UnexpectedContractTerm { id, field });
                }
                if !doc.invoice_urls.is_empty() {
                    return Err(RecordDecodeError::UnexpectedContractTerm {
                        id,
                        field: "invoiceUrls",
                    });
                }
                None
            }
        };

        Ok(FreightRecord {
            id,
            map_number: doc.map_number,
            origin: doc.origin,
            destination: doc.destination,
            total_km: doc.total_km,
            weight: doc.weight,
            map_value: doc.map_value,
            truck_type: doc.truck_type,
            loading_mode,
            route_info: doc.route_info,
            map_image_url: doc.map_image_url,
            loading_date: doc.loading_date,
            status,
            carrier_proposals: doc.carrier_proposals,
            contract,
            invoice_urls: doc.invoice_urls,
            created_at: doc.created_at,
            version: doc.version,
        })
    }
}
