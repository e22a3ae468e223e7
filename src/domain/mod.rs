//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, events, errors)
//! - `freight` - Freight record aggregate: quotation, negotiation, contracting
//! - `reporting` - Pure aggregates for the charts page and carrier report
//! - `reference` - Truck type and carrier catalog entities

pub mod foundation;
pub mod freight;
pub mod reference;
pub mod reporting;
