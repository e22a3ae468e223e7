//! Freight record aggregate.
//!
//! One record per shipment map. It is opened by a quotation, collects
//! carrier proposals while negotiating, is contracted exactly once, and
//! afterwards only accumulates invoice URLs.
//!
//! # Invariants
//!
//! - `carrier_proposals` keys are fixed when the record is opened
//! - contract terms (carrier, final value, timestamp) are set together,
//!   only by the transition to `Contracted`, and never change afterwards
//! - `invoice_urls` only grows

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::quotation::{require_non_negative, require_positive, require_text};
use super::{DerivedMetrics, FreightStatus, LoadingMode, QuotationRequest};
use crate::domain::foundation::{
    DomainError, ErrorCode, FreightId, StateMachine, Timestamp,
};

/// Terms fixed at contracting time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTerms {
    pub selected_carrier: String,
    pub final_value: f64,
    pub contracted_at: Timestamp,
}

/// A carrier proposal picked on the negotiation board, pending finalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalSelection {
    freight_id: FreightId,
    carrier: String,
    proposal_value: f64,
}

impl ProposalSelection {
    pub fn freight_id(&self) -> &FreightId {
        &self.freight_id
    }

    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    pub fn proposal_value(&self) -> f64 {
        self.proposal_value
    }
}

/// Corrections allowed while a record is negotiating. `None` keeps the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsCorrection {
    pub loading_date: Option<NaiveDate>,
    pub map_value: Option<f64>,
    pub weight: Option<f64>,
}

impl DetailsCorrection {
    pub fn is_empty(&self) -> bool {
        self.loading_date.is_none() && self.map_value.is_none() && self.weight.is_none()
    }
}

/// Freight record aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightRecord {
    pub(super) id: FreightId,
    pub(super) map_number: String,
    pub(super) origin: String,
    pub(super) destination: String,
    pub(super) total_km: f64,
    pub(super) weight: f64,
    pub(super) map_value: f64,
    pub(super) truck_type: String,
    pub(super) loading_mode: LoadingMode,
    pub(super) route_info: Option<String>,
    pub(super) map_image_url: Option<String>,
    pub(super) loading_date: NaiveDate,
    pub(super) status: FreightStatus,
    pub(super) carrier_proposals: BTreeMap<String, f64>,
    pub(super) contract: Option<ContractTerms>,
    pub(super) invoice_urls: Vec<String>,
    pub(super) created_at: Timestamp,
    pub(super) version: u64,
}

impl FreightRecord {
    /// Opens a new record from a quotation, in `Negotiating` status with
    /// every invited carrier mapped to a zero proposal.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any required quotation field is missing or out of range
    pub fn open(id: FreightId, request: QuotationRequest) -> Result<Self, DomainError> {
        request.validate()?;

        let carrier_proposals = request
            .invited_carriers()
            .into_iter()
            .map(|carrier| (carrier, 0.0))
            .collect();

        Ok(Self {
            id,
            map_number: request.map_number.trim().to_string(),
            origin: request.origin,
            destination: request.destination.trim().to_string(),
            total_km: request.total_km,
            weight: request.weight,
            map_value: request.map_value,
            truck_type: request.truck_type,
            loading_mode: request.loading_mode,
            route_info: request.route_info.filter(|info| !info.trim().is_empty()),
            map_image_url: request.map_image_url.filter(|url| !url.trim().is_empty()),
            loading_date: request.loading_date,
            status: FreightStatus::Negotiating,
            carrier_proposals,
            contract: None,
            invoice_urls: Vec::new(),
            created_at: Timestamp::now(),
            version: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &FreightId {
        &self.id
    }

    pub fn map_number(&self) -> &str {
        &self.map_number
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn total_km(&self) -> f64 {
        self.total_km
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn map_value(&self) -> f64 {
        self.map_value
    }

    pub fn truck_type(&self) -> &str {
        &self.truck_type
    }

    pub fn loading_mode(&self) -> LoadingMode {
        self.loading_mode
    }

    pub fn route_info(&self) -> Option<&str> {
        self.route_info.as_deref()
    }

    pub fn map_image_url(&self) -> Option<&str> {
        self.map_image_url.as_deref()
    }

    pub fn loading_date(&self) -> NaiveDate {
        self.loading_date
    }

    pub fn status(&self) -> FreightStatus {
        self.status
    }

    pub fn carrier_proposals(&self) -> &BTreeMap<String, f64> {
        &self.carrier_proposals
    }

    pub fn contract_terms(&self) -> Option<&ContractTerms> {
        self.contract.as_ref()
    }

    pub fn selected_carrier(&self) -> Option<&str> {
        self.contract.as_ref().map(|c| c.selected_carrier.as_str())
    }

    pub fn final_value(&self) -> Option<f64> {
        self.contract.as_ref().map(|c| c.final_value)
    }

    pub fn contracted_at(&self) -> Option<Timestamp> {
        self.contract.as_ref().map(|c| c.contracted_at)
    }

    pub fn invoice_urls(&self) -> &[String] {
        &self.invoice_urls
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Revision number assigned by the record store.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Proposals that can be picked on the negotiation board (value > 0).
    pub fn available_proposals(&self) -> Vec<(&str, f64)> {
        self.carrier_proposals
            .iter()
            .filter(|(_, value)| **value > 0.0)
            .map(|(carrier, value)| (carrier.as_str(), *value))
            .collect()
    }

    /// True until at least one carrier has quoted.
    pub fn awaiting_proposals(&self) -> bool {
        self.available_proposals().is_empty()
    }

    /// The accepted proposal of the selected carrier, if it is present and positive.
    pub fn selected_proposal(&self) -> Option<f64> {
        let carrier = self.selected_carrier()?;
        self.carrier_proposals
            .get(carrier)
            .copied()
            .filter(|value| *value > 0.0)
    }

    /// Savings figures for a contracted record.
    ///
    /// A missing selected proposal falls back to the final value so the
    /// record contributes zero savings.
    pub fn derived_metrics(&self) -> Option<DerivedMetrics> {
        let final_value = self.final_value()?;
        let proposal = self.selected_proposal().unwrap_or(final_value);
        Some(DerivedMetrics::compute(proposal, final_value, self.map_value))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a carrier's quoted price.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the record is already contracted
    /// - `ValidationFailed` if the value is not greater than zero
    /// - `UnknownCarrier` if the carrier was not invited at quotation time
    pub fn record_proposal(&mut self, carrier: &str, value: f64) -> Result<(), DomainError> {
        self.ensure_negotiating()?;
        require_positive("proposal_value", value)?;

        match self.carrier_proposals.get_mut(carrier) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::UnknownCarrier,
                format!("Carrier '{}' was not invited to quote this freight", carrier),
            )
            .with_detail("carrier", carrier)),
        }
    }

    /// Applies corrections to loading date, map value and weight.
    ///
    /// Returns whether anything actually changed, so re-applying the same
    /// values is a no-op.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the record is already contracted
    /// - `ValidationFailed` if map value is not positive or weight is negative
    pub fn correct_details(&mut self, correction: &DetailsCorrection) -> Result<bool, DomainError> {
        self.ensure_negotiating()?;
        if let Some(map_value) = correction.map_value {
            require_positive("map_value", map_value)?;
        }
        if let Some(weight) = correction.weight {
            require_non_negative("weight", weight)?;
        }

        let mut changed = false;
        if let Some(date) = correction.loading_date {
            changed |= date != self.loading_date;
            self.loading_date = date;
        }
        if let Some(map_value) = correction.map_value {
            changed |= map_value != self.map_value;
            self.map_value = map_value;
        }
        if let Some(weight) = correction.weight {
            changed |= weight != self.weight;
            self.weight = weight;
        }
        Ok(changed)
    }

    /// Picks a carrier's proposal as the one to finalize.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the record is already contracted
    /// - `UnknownCarrier` if the carrier was not invited
    /// - `ValidationFailed` if the carrier has not proposed yet
    pub fn select_proposal(&self, carrier: &str) -> Result<ProposalSelection, DomainError> {
        self.ensure_negotiating()?;
        let value = self.carrier_proposals.get(carrier).copied().ok_or_else(|| {
            DomainError::new(
                ErrorCode::UnknownCarrier,
                format!("Carrier '{}' was not invited to quote this freight", carrier),
            )
            .with_detail("carrier", carrier)
        })?;
        require_positive("proposal_value", value)?;

        Ok(ProposalSelection {
            freight_id: self.id,
            carrier: carrier.to_string(),
            proposal_value: value,
        })
    }

    /// Closes the negotiation with the selected carrier at the final value.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the record is already contracted
    /// - `ValidationFailed` if the selection belongs to another record, the
    ///   carrier's proposal is no longer positive, or `final_value <= 0`
    pub fn contract(
        &mut self,
        selection: &ProposalSelection,
        final_value: f64,
        contracted_at: Timestamp,
    ) -> Result<(), DomainError> {
        let next = self.status.transition_to(FreightStatus::Contracted).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Freight is already contracted",
            )
        })?;

        if selection.freight_id != self.id {
            return Err(DomainError::validation(
                "selection",
                "Selected proposal belongs to another freight",
            ));
        }
        let current = self.select_proposal(&selection.carrier)?;
        require_positive("final_value", final_value)?;

        self.contract = Some(ContractTerms {
            selected_carrier: current.carrier,
            final_value,
            contracted_at,
        });
        self.status = next;
        Ok(())
    }

    /// Appends an uploaded invoice URL.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the record is not contracted
    /// - `ValidationFailed` if the URL is blank
    pub fn attach_invoice(&mut self, url: impl Into<String>) -> Result<(), DomainError> {
        if self.status != FreightStatus::Contracted {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Invoices can only be attached to contracted freight",
            ));
        }
        let url = url.into();
        require_text("invoice_url", &url)?;
        self.invoice_urls.push(url);
        Ok(())
    }

    /// Stamps the revision number the record store assigned.
    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    fn ensure_negotiating(&self) -> Result<(), DomainError> {
        if self.status.is_negotiating() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Freight is already contracted",
            ))
        }
    }
}
