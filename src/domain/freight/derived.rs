//! Per-shipment derived figures. Computed on demand, never stored.

use serde::Serialize;

/// `numerator / denominator * 100`, or 0 when the denominator is zero.
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    numerator / denominator * 100.0
}

/// Savings of the negotiated value against the accepted proposal.
pub fn savings(proposal_value: f64, final_value: f64) -> f64 {
    proposal_value - final_value
}

/// Final value as a percentage of the map's reference price.
pub fn percentage_vs_map(final_value: f64, map_value: f64) -> f64 {
    percent_of(final_value, map_value)
}

/// Savings as a percentage of the proposal; 0 when there is no proposal.
pub fn savings_percentage(proposal_value: Option<f64>, final_value: f64) -> f64 {
    match proposal_value {
        Some(proposal) if proposal != 0.0 => {
            percent_of(savings(proposal, final_value), proposal)
        }
        _ => 0.0,
    }
}

/// Figures shown next to a contracted shipment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub proposal_value: f64,
    pub final_value: f64,
    pub map_value: f64,
    pub savings: f64,
    pub percentage_vs_map: f64,
    pub savings_percentage: f64,
}

impl DerivedMetrics {
    pub fn compute(proposal_value: f64, final_value: f64, map_value: f64) -> Self {
        Self {
            proposal_value,
            final_value,
            map_value,
            savings: savings(proposal_value, final_value),
            percentage_vs_map: percentage_vs_map(final_value, map_value),
            savings_percentage: savings_percentage(Some(proposal_value), final_value),
        }
    }
}
