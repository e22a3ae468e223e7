//! Freight Desk - Freight quotation, negotiation and contracting tracker
//!
//! Records one shipment map per freight, collects carrier proposals while
//! negotiating, contracts it once, and aggregates contracted freights into
//! per-carrier, per-state and per-month reports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
