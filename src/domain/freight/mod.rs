//! Freight module - Quotation, negotiation and contracting of shipments.
//!
//! A `FreightRecord` is opened from a `QuotationRequest`, collects carrier
//! proposals while `Negotiating`, and is closed once as `Contracted`.

mod aggregate;
mod derived;
mod document;
mod errors;
mod events;
mod quotation;
mod status;

pub use aggregate::{ContractTerms, DetailsCorrection, FreightRecord, ProposalSelection};
pub use derived::{percent_of, percentage_vs_map, savings, savings_percentage, DerivedMetrics};
pub use document::{FreightDocument, RecordDecodeError};
pub use errors::FreightError;
pub use events::{
    FreightContracted, FreightDetailsCorrected, FreightQuoted, InvoiceAttached, ProposalRecorded,
};
pub use quotation::{QuotationRequest, DEFAULT_ORIGIN};
pub use status::{FreightStatus, LoadingMode};

#[cfg(test)]
pub(crate) use aggregate::fixtures;
#[cfg(test)]
pub(crate) use quotation::sample_request;
