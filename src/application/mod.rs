//! Application layer - Commands, Queries, Handlers and page view-models.
//!
//! Handlers orchestrate domain operations through the ports. View-models hold
//! the transient state of each page and turn it into commands.

pub mod handlers;
pub mod views;

pub use handlers::*;
pub use views::{ContractedLedger, LedgerSort, NegotiationBoard, QuotationForm};
