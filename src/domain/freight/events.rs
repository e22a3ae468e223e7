//! Freight domain events.
//!
//! Published after the record store accepts a change:
//! - `FreightQuoted` - New freight map opened for negotiation
//! - `ProposalRecorded` - Carrier quoted a price
//! - `FreightDetailsCorrected` - Loading date, map value or weight changed
//! - `FreightContracted` - Negotiation closed with a carrier
//! - `InvoiceAttached` - Invoice uploaded for a contracted freight

use serde::{Deserialize, Serialize};

use super::LoadingMode;
use crate::domain::foundation::{domain_event, EventId, FreightId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// FreightQuoted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a quotation opens a new freight record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreightQuoted {
    pub event_id: EventId,
    pub freight_id: FreightId,
    pub map_number: String,
    pub destination: String,
    pub loading_mode: LoadingMode,
    pub map_value: f64,
    /// Carriers invited to quote.
    pub carriers: Vec<String>,
    pub quoted_at: Timestamp,
}

domain_event!(
    FreightQuoted,
    event_type = "freight.quoted.v1",
    schema_version = 1,
    aggregate_id = freight_id,
    aggregate_type = "FreightRecord",
    occurred_at = quoted_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ProposalRecorded
// ════════════════════════════════════════════════════════════════════════════

/// Published when a carrier's proposal is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalRecorded {
    pub event_id: EventId,
    pub freight_id: FreightId,
    pub carrier: String,
    /// Previous value; 0 when the carrier had not quoted before.
    pub previous_value: f64,
    pub value: f64,
    pub recorded_at: Timestamp,
}

domain_event!(
    ProposalRecorded,
    event_type = "freight.proposal_recorded.v1",
    schema_version = 1,
    aggregate_id = freight_id,
    aggregate_type = "FreightRecord",
    occurred_at = recorded_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// FreightDetailsCorrected
// ════════════════════════════════════════════════════════════════════════════

/// Published when pre-contract details are corrected.
///
/// Carries the resulting values, not the delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreightDetailsCorrected {
    pub event_id: EventId,
    pub freight_id: FreightId,
    pub loading_date: chrono::NaiveDate,
    pub map_value: f64,
    pub weight: f64,
    pub corrected_at: Timestamp,
}

domain_event!(
    FreightDetailsCorrected,
    event_type = "freight.details_corrected.v1",
    schema_version = 1,
    aggregate_id = freight_id,
    aggregate_type = "FreightRecord",
    occurred_at = corrected_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// FreightContracted
// ════════════════════════════════════════════════════════════════════════════

/// Published when the negotiation closes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreightContracted {
    pub event_id: EventId,
    pub freight_id: FreightId,
    pub selected_carrier: String,
    pub proposal_value: f64,
    pub final_value: f64,
    pub savings: f64,
    pub contracted_at: Timestamp,
}

domain_event!(
    FreightContracted,
    event_type = "freight.contracted.v1",
    schema_version = 1,
    aggregate_id = freight_id,
    aggregate_type = "FreightRecord",
    occurred_at = contracted_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// InvoiceAttached
// ════════════════════════════════════════════════════════════════════════════

/// Published when an invoice file is attached to a contracted freight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceAttached {
    pub event_id: EventId,
    pub freight_id: FreightId,
    pub invoice_url: String,
    /// Number of invoices after this one was appended.
    pub invoice_count: usize,
    pub attached_at: Timestamp,
}

domain_event!(
    InvoiceAttached,
    event_type = "freight.invoice_attached.v1",
    schema_version = 1,
    aggregate_id = freight_id,
    aggregate_type = "FreightRecord",
    occurred_at = attached_at,
    event_id = event_id
);
