//! Reporting module - Aggregates over contracted freight records.
//!
//! Pure functions only. Callers load the records and choose which ones to
//! pass in; everything here degrades to zero or empty output instead of
//! failing.

mod carrier_stats;
mod dashboard;
mod metrics;
mod state;

pub use carrier_stats::{stats_by_carrier, total_stats, CarrierStats, FreightSummary, TotalStats};
pub use dashboard::{ChartsDashboard, FreightReport};
pub use metrics::{
    aggregate_value_comparison, contracted_value, count_by_destination_state,
    distribution_by_loading_mode, km_by_carrier, month_label, record_savings, savings_by_carrier,
    total_by_carrier, value_over_time, CarrierAmount, LoadingModeCount, MonthlyValue, StateCount,
    ValueComparison,
};
pub use state::{extract_state, BrazilianState, DestinationState};
