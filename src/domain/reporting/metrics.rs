//! Chart series over contracted freight records.
//!
//! Every function is total: empty input gives empty series or zeroed
//! figures, and zero denominators give 0. Records without contract terms
//! still count toward record totals but join no carrier and contribute a
//! final value of 0.

use serde::Serialize;
use std::collections::BTreeMap;

use super::state::{extract_state, DestinationState};
use crate::domain::freight::{percent_of, FreightRecord, LoadingMode};

/// pt-BR month abbreviations used in chart labels.
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// One bar of a per-carrier chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierAmount {
    pub carrier: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateCount {
    pub state: DestinationState,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingModeCount {
    pub mode: LoadingMode,
    pub label: &'static str,
    pub count: usize,
}

/// Contracted value in one calendar month (UTC).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyValue {
    pub year: i32,
    pub month: u32,
    /// Display label such as `jan/24`. Never used for ordering.
    pub label: String,
    pub value: f64,
}

/// Map value against contracted value across a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueComparison {
    pub total_map_value: f64,
    pub total_final_value: f64,
    pub percentage: f64,
    pub savings: f64,
    pub savings_percentage: f64,
}

/// Final value of a record, or 0 while it has no contract terms.
pub fn contracted_value(record: &FreightRecord) -> f64 {
    record.final_value().unwrap_or(0.0)
}

/// Negotiated savings of a record; 0 when the selected proposal is missing.
pub fn record_savings(record: &FreightRecord) -> f64 {
    record
        .derived_metrics()
        .map(|metrics| metrics.savings)
        .unwrap_or(0.0)
}

/// `jan/24` style label for a calendar month.
pub fn month_label(year: i32, month: u32) -> String {
    let name = month
        .checked_sub(1)
        .and_then(|index| MONTH_ABBREVIATIONS.get(index as usize))
        .copied()
        .unwrap_or("???");
    format!("{}/{:02}", name, year.rem_euclid(100))
}

pub fn total_by_carrier(records: &[FreightRecord]) -> Vec<CarrierAmount> {
    sum_by_carrier(records, contracted_value)
}

pub fn savings_by_carrier(records: &[FreightRecord]) -> Vec<CarrierAmount> {
    sum_by_carrier(records, record_savings)
}

pub fn km_by_carrier(records: &[FreightRecord]) -> Vec<CarrierAmount> {
    sum_by_carrier(records, FreightRecord::total_km)
}

/// Record count per destination state, most frequent first.
pub fn count_by_destination_state(records: &[FreightRecord]) -> Vec<StateCount> {
    let counts = count_states(records);
    let mut series: Vec<StateCount> = counts
        .into_iter()
        .map(|(state, count)| StateCount { state, count })
        .collect();
    series.sort_by(|a, b| b.count.cmp(&a.count).then(a.state.cmp(&b.state)));
    series
}

/// Record count per loading mode; modes with no records are omitted.
pub fn distribution_by_loading_mode(records: &[FreightRecord]) -> Vec<LoadingModeCount> {
    let mut counts: BTreeMap<LoadingMode, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.loading_mode()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(mode, count)| LoadingModeCount {
            mode,
            label: mode.label(),
            count,
        })
        .collect()
}

/// Contracted value per calendar month, oldest month first.
pub fn value_over_time(records: &[FreightRecord]) -> Vec<MonthlyValue> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for record in records {
        if let (Some(at), Some(value)) = (record.contracted_at(), record.final_value()) {
            *buckets.entry(at.year_month()).or_default() += value;
        }
    }
    buckets
        .into_iter()
        .map(|((year, month), value)| MonthlyValue {
            year,
            month,
            label: month_label(year, month),
            value,
        })
        .collect()
}

pub fn aggregate_value_comparison(records: &[FreightRecord]) -> ValueComparison {
    let total_map_value: f64 = records.iter().map(FreightRecord::map_value).sum();
    let total_final_value: f64 = records.iter().map(contracted_value).sum();
    let savings = total_map_value - total_final_value;

    ValueComparison {
        total_map_value,
        total_final_value,
        percentage: percent_of(total_final_value, total_map_value),
        savings,
        savings_percentage: percent_of(savings, total_map_value),
    }
}

pub(super) fn count_states<'a, I>(records: I) -> BTreeMap<DestinationState, usize>
where
    I: IntoIterator<Item = &'a FreightRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(extract_state(record.destination())).or_default() += 1;
    }
    counts
}

fn sum_by_carrier<F>(records: &[FreightRecord], amount: F) -> Vec<CarrierAmount>
where
    F: Fn(&FreightRecord) -> f64,
{
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        if let Some(carrier) = record.selected_carrier() {
            *totals.entry(carrier).or_default() += amount(record);
        }
    }
    let mut series: Vec<CarrierAmount> = totals
        .into_iter()
        .map(|(carrier, value)| CarrierAmount {
            carrier: carrier.to_string(),
            value,
        })
        .collect();
    sort_descending(&mut series);
    series
}

/// Largest value first; ties keep alphabetical carrier order.
fn sort_descending(series: &mut [CarrierAmount]) {
    series.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.carrier.cmp(&b.carrier))
    });
}
