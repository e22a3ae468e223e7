//! Negotiation board state.
//!
//! Lists the negotiating records and holds what the operator has typed but
//! not yet saved: proposal inputs per record and carrier, the one proposal
//! picked for finalization with its final value, and the one record open
//! for editing.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::application::handlers::{
    CorrectDetailsCommand, FinalizeNegotiationCommand, RecordProposalCommand,
};
use crate::domain::foundation::FreightId;
use crate::domain::freight::{DetailsCorrection, FreightError, FreightRecord, ProposalSelection};

/// Editable fields of the record being corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub freight_id: FreightId,
    pub loading_date: NaiveDate,
    pub map_value: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Default)]
pub struct NegotiationBoard {
    records: Vec<FreightRecord>,
    search: String,
    proposal_inputs: BTreeMap<(FreightId, String), f64>,
    selection: Option<ProposalSelection>,
    final_value: f64,
    editing: Option<EditDraft>,
}

impl NegotiationBoard {
    pub fn new(records: Vec<FreightRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Swaps in freshly loaded records. Typed inputs, the selection and the
    /// edit draft are dropped for records that left the board.
    pub fn reload(&mut self, records: Vec<FreightRecord>) {
        self.records = records;
        let ids: Vec<FreightId> = self.records.iter().map(|r| *r.id()).collect();
        self.proposal_inputs.retain(|(id, _), _| ids.contains(id));
        if self
            .selection
            .as_ref()
            .is_some_and(|s| !ids.contains(s.freight_id()))
        {
            self.clear_selection();
        }
        if self
            .editing
            .as_ref()
            .is_some_and(|d| !ids.contains(&d.freight_id))
        {
            self.editing = None;
        }
    }

    pub fn records(&self) -> &[FreightRecord] {
        &self.records
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Records whose map number contains the search term, ignoring case.
    pub fn visible(&self) -> Vec<&FreightRecord> {
        let term = self.search.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| term.is_empty() || r.map_number().to_lowercase().contains(&term))
            .collect()
    }

    fn record(&self, id: &FreightId) -> Result<&FreightRecord, FreightError> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| FreightError::not_found(*id))
    }

    // === Proposals ===

    pub fn set_proposal_input(&mut self, freight_id: FreightId, carrier: &str, value: f64) {
        self.proposal_inputs
            .insert((freight_id, carrier.to_string()), value);
    }

    pub fn proposal_input(&self, freight_id: FreightId, carrier: &str) -> f64 {
        self.proposal_inputs
            .get(&(freight_id, carrier.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Command for saving a typed proposal, or `None` while the input is
    /// not a positive number.
    pub fn proposal_command(&self, freight_id: FreightId, carrier: &str) -> Option<RecordProposalCommand> {
        let value = self.proposal_input(freight_id, carrier);
        (value.is_finite() && value > 0.0).then(|| RecordProposalCommand {
            freight_id,
            carrier: carrier.to_string(),
            value,
        })
    }

    // === Finalization ===

    /// Picks a positive proposal as the one to finalize. Replaces any
    /// earlier pick, including one on another record.
    pub fn select_proposal(&mut self, freight_id: FreightId, carrier: &str) -> Result<(), FreightError> {
        let selection = self.record(&freight_id)?.select_proposal(carrier)?;
        self.selection = Some(selection);
        Ok(())
    }

    pub fn selection(&self) -> Option<&ProposalSelection> {
        self.selection.as_ref()
    }

    pub fn set_final_value(&mut self, value: f64) {
        self.final_value = value;
    }

    pub fn final_value(&self) -> f64 {
        self.final_value
    }

    /// Command for closing `freight_id`, or `None` unless a proposal of that
    /// record is picked and the final value is positive.
    pub fn finalize_command(&self, freight_id: FreightId) -> Option<FinalizeNegotiationCommand> {
        let selection = self.selection.as_ref()?;
        if *selection.freight_id() != freight_id
            || !self.final_value.is_finite()
            || self.final_value <= 0.0
        {
            return None;
        }
        Some(FinalizeNegotiationCommand {
            freight_id,
            carrier: selection.carrier().to_string(),
            final_value: self.final_value,
        })
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.final_value = 0.0;
    }

    // === Editing ===

    /// Opens `freight_id` for editing, closing any other draft.
    pub fn start_editing(&mut self, freight_id: FreightId) -> Result<(), FreightError> {
        let record = self.record(&freight_id)?;
        self.editing = Some(EditDraft {
            freight_id,
            loading_date: record.loading_date(),
            map_value: record.map_value(),
            weight: record.weight(),
        });
        Ok(())
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    /// Command saving the open draft.
    pub fn save_command(&self) -> Option<CorrectDetailsCommand> {
        self.editing.as_ref().map(|draft| CorrectDetailsCommand {
            freight_id: draft.freight_id,
            correction: DetailsCorrection {
                loading_date: Some(draft.loading_date),
                map_value: Some(draft.map_value),
                weight: Some(draft.weight),
            },
        })
    }
}
