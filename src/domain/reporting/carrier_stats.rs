//! Per-carrier and overall statistics for the freight report.

use serde::Serialize;
use std::collections::BTreeMap;

use super::metrics::{contracted_value, count_states, record_savings};
use super::state::DestinationState;
use crate::domain::foundation::{FreightId, Timestamp};
use crate::domain::freight::{FreightRecord, LoadingMode};

/// Row of a carrier's "freights done" list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightSummary {
    pub id: FreightId,
    pub map_number: String,
    pub destination: String,
    pub final_value: f64,
    pub contracted_at: Option<Timestamp>,
}

impl From<&FreightRecord> for FreightSummary {
    fn from(record: &FreightRecord) -> Self {
        Self {
            id: *record.id(),
            map_number: record.map_number().to_string(),
            destination: record.destination().to_string(),
            final_value: contracted_value(record),
            contracted_at: record.contracted_at(),
        }
    }
}

/// Aggregates for one selected carrier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierStats {
    pub carrier: String,
    pub freight_count: usize,
    pub total_value: f64,
    pub total_savings: f64,
    pub average_savings: f64,
    pub freight_list: Vec<FreightSummary>,
    pub loads_by_state: BTreeMap<DestinationState, usize>,
    /// Mode of the carrier's first record; decides its report section.
    pub loading_mode: LoadingMode,
    /// Set when later records disagree with `loading_mode`.
    pub mixed_loading_modes: bool,
}

/// Aggregates across all records regardless of carrier.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalStats {
    pub total_freight: usize,
    pub total_value: f64,
    pub total_map_value: f64,
    pub total_savings: f64,
    pub average_savings: f64,
    pub loads_by_state: BTreeMap<DestinationState, usize>,
}

/// Groups records by selected carrier, largest total value first.
///
/// Records without a selected carrier are left out.
pub fn stats_by_carrier(records: &[FreightRecord]) -> Vec<CarrierStats> {
    let mut groups: BTreeMap<&str, Vec<&FreightRecord>> = BTreeMap::new();
    for record in records {
        if let Some(carrier) = record.selected_carrier() {
            groups.entry(carrier).or_default().push(record);
        }
    }

    let mut stats: Vec<CarrierStats> = groups
        .into_iter()
        .filter_map(|(carrier, group)| carrier_stats(carrier, &group))
        .collect();
    stats.sort_by(|a, b| {
        b.total_value
            .total_cmp(&a.total_value)
            .then_with(|| a.carrier.cmp(&b.carrier))
    });
    stats
}

pub fn total_stats(records: &[FreightRecord]) -> TotalStats {
    let total_freight = records.len();
    let total_savings: f64 = records.iter().map(record_savings).sum();

    TotalStats {
        total_freight,
        total_value: records.iter().map(contracted_value).sum(),
        total_map_value: records.iter().map(FreightRecord::map_value).sum(),
        total_savings,
        average_savings: average(total_savings, total_freight),
        loads_by_state: count_states(records),
    }
}

fn carrier_stats(carrier: &str, group: &[&FreightRecord]) -> Option<CarrierStats> {
    let loading_mode = group.first()?.loading_mode();
    let total_savings: f64 = group.iter().map(|record| record_savings(record)).sum();

    Some(CarrierStats {
        carrier: carrier.to_string(),
        freight_count: group.len(),
        total_value: group.iter().map(|record| contracted_value(record)).sum(),
        total_savings,
        average_savings: average(total_savings, group.len()),
        freight_list: group.iter().map(|record| FreightSummary::from(*record)).collect(),
        loads_by_state: count_states(group.iter().copied()),
        loading_mode,
        mixed_loading_modes: group
            .iter()
            .any(|record| record.loading_mode() != loading_mode),
    })
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

#[cfg(test)]
#[path = "carrier_stats_test.rs"]
mod carrier_stats_test;
