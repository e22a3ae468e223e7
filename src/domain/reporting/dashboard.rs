//! Read models assembled from contracted records: the charts page and the
//! carrier report with its state drill-down.

use serde::Serialize;

use super::carrier_stats::{stats_by_carrier, total_stats, CarrierStats, TotalStats};
use super::metrics::{
    aggregate_value_comparison, count_by_destination_state, distribution_by_loading_mode,
    km_by_carrier, savings_by_carrier, total_by_carrier, value_over_time, CarrierAmount,
    LoadingModeCount, MonthlyValue, StateCount, ValueComparison,
};
use super::state::{extract_state, BrazilianState, DestinationState};
use crate::domain::freight::{FreightRecord, LoadingMode};

/// Every chart series of the charts page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsDashboard {
    pub total_freight: usize,
    pub value_by_carrier: Vec<CarrierAmount>,
    pub count_by_state: Vec<StateCount>,
    pub loading_mode_distribution: Vec<LoadingModeCount>,
    pub savings_by_carrier: Vec<CarrierAmount>,
    pub value_over_time: Vec<MonthlyValue>,
    pub km_by_carrier: Vec<CarrierAmount>,
    pub value_comparison: ValueComparison,
}

impl ChartsDashboard {
    pub fn build(records: &[FreightRecord]) -> Self {
        Self {
            total_freight: records.len(),
            value_by_carrier: total_by_carrier(records),
            count_by_state: count_by_destination_state(records),
            loading_mode_distribution: distribution_by_loading_mode(records),
            savings_by_carrier: savings_by_carrier(records),
            value_over_time: value_over_time(records),
            km_by_carrier: km_by_carrier(records),
            value_comparison: aggregate_value_comparison(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_freight == 0
    }
}

/// Carrier report, optionally narrowed to one destination state.
///
/// Carriers are split into the palletized and bag sections by the loading
/// mode of their first record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightReport {
    pub state_filter: Option<BrazilianState>,
    pub totals: TotalStats,
    pub paletizados: Vec<CarrierStats>,
    pub bag: Vec<CarrierStats>,
}

impl FreightReport {
    pub fn build(records: &[FreightRecord], state_filter: Option<BrazilianState>) -> Self {
        let selected: Vec<FreightRecord> = match state_filter {
            Some(state) => records
                .iter()
                .filter(|record| extract_state(record.destination()) == DestinationState::Known(state))
                .cloned()
                .collect(),
            None => records.to_vec(),
        };

        let (paletizados, bag): (Vec<CarrierStats>, Vec<CarrierStats>) = stats_by_carrier(&selected)
            .into_iter()
            .partition(|stats| stats.loading_mode == LoadingMode::Paletizados);

        Self {
            state_filter,
            totals: total_stats(&selected),
            paletizados,
            bag,
        }
    }

    /// Carriers whose contracted records span both loading modes.
    pub fn mixed_mode_carriers(&self) -> impl Iterator<Item = &CarrierStats> {
        self.paletizados
            .iter()
            .chain(self.bag.iter())
            .filter(|stats| stats.mixed_loading_modes)
    }

    pub fn section(&self, mode: LoadingMode) -> &[CarrierStats] {
        match mode {
            LoadingMode::Paletizados => &self.paletizados,
            LoadingMode::Bag => &self.bag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::freight::fixtures::{at, contracted};

    fn records() -> Vec<FreightRecord> {
        vec![
            contracted("A", 900.0, 850.0, 1000.0, "Sorocaba/SP", LoadingMode::Paletizados, at(2024, 1, 10)),
            contracted("B", 500.0, 450.0, 600.0, "Curitiba/PR", LoadingMode::Bag, at(2024, 2, 5)),
            contracted("C", 300.0, 280.0, 320.0, "Campinas/SP", LoadingMode::Bag, at(2024, 2, 6)),
            contracted("A", 200.0, 150.0, 250.0, "Maringá/PR", LoadingMode::Bag, at(2024, 3, 1)),
        ]
    }

    #[test]
    fn charts_dashboard_for_empty_input() {
        let charts = ChartsDashboard::build(&[]);
        assert!(charts.is_empty());
        assert!(charts.value_by_carrier.is_empty());
        assert_eq!(charts.value_comparison, ValueComparison::default());
    }

    #[test]
    fn charts_dashboard_collects_every_series() {
        let charts = ChartsDashboard::build(&records());
        assert_eq!(charts.total_freight, 4);
        assert_eq!(charts.value_by_carrier[0].carrier, "A");
        assert_eq!(charts.value_over_time.len(), 3);
        assert_eq!(charts.loading_mode_distribution.len(), 2);
    }

    #[test]
    fn report_splits_sections_by_first_record_mode() {
        let report = FreightReport::build(&records(), None);
        let palletized: Vec<_> = report.paletizados.iter().map(|s| s.carrier.as_str()).collect();
        let bag: Vec<_> = report.bag.iter().map(|s| s.carrier.as_str()).collect();
        assert_eq!(palletized, vec!["A"]);
        assert_eq!(bag, vec!["B", "C"]);
        assert_eq!(report.totals.total_freight, 4);
    }

    #[test]
    fn report_flags_mixed_mode_carrier() {
        let report = FreightReport::build(&records(), None);
        let flagged: Vec<_> = report.mixed_mode_carriers().map(|s| s.carrier.as_str()).collect();
        assert_eq!(flagged, vec!["A"]);
    }

    #[test]
    fn report_drills_down_to_one_state() {
        let report = FreightReport::build(&records(), Some(BrazilianState::SP));
        assert_eq!(report.state_filter, Some(BrazilianState::SP));
        assert_eq!(report.totals.total_freight, 2);
        assert_eq!(report.totals.total_value, 1130.0);
        assert_eq!(report.section(LoadingMode::Paletizados)[0].carrier, "A");
        assert!(report.mixed_mode_carriers().next().is_none());
    }

    #[test]
    fn report_for_state_without_loads_is_zeroed() {
        let report = FreightReport::build(&records(), Some(BrazilianState::AM));
        assert_eq!(report.totals, TotalStats::default());
        assert!(report.paletizados.is_empty());
        assert!(report.bag.is_empty());
    }
}
