//! Quotation form state.
//!
//! Starts in palletized mode with the first palletized truck type and every
//! catalog carrier invited. Switching the loading mode resets the truck type
//! to the first one of the new mode.

use chrono::NaiveDate;

use crate::domain::freight::{LoadingMode, QuotationRequest, DEFAULT_ORIGIN};
use crate::domain::reference::{truck_types_for, Carrier, TruckType};

#[derive(Debug, Clone, PartialEq)]
pub struct QuotationForm {
    truck_types: Vec<TruckType>,
    carriers: Vec<Carrier>,
    loading_mode: LoadingMode,
    truck_type: String,
    /// Invited carriers, kept in catalog order.
    selected_carriers: Vec<String>,
    pub map_number: String,
    pub origin: String,
    pub destination: String,
    pub total_km: f64,
    pub weight: f64,
    pub map_value: f64,
    pub route_info: String,
    pub map_image_url: Option<String>,
    pub loading_date: NaiveDate,
}

impl QuotationForm {
    pub fn new(truck_types: Vec<TruckType>, carriers: Vec<Carrier>, today: NaiveDate) -> Self {
        let selected_carriers = carriers.iter().map(|c| c.name.clone()).collect();
        let mut form = Self {
            truck_types,
            carriers,
            loading_mode: LoadingMode::Paletizados,
            truck_type: String::new(),
            selected_carriers,
            map_number: String::new(),
            origin: DEFAULT_ORIGIN.to_string(),
            destination: String::new(),
            total_km: 0.0,
            weight: 0.0,
            map_value: 0.0,
            route_info: String::new(),
            map_image_url: None,
            loading_date: today,
        };
        form.switch_loading_mode(LoadingMode::Paletizados);
        form
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn loading_mode(&self) -> LoadingMode {
        self.loading_mode
    }

    pub fn truck_type(&self) -> &str {
        &self.truck_type
    }

    pub fn carriers(&self) -> &[Carrier] {
        &self.carriers
    }

    /// Truck types offered for the current loading mode.
    pub fn available_truck_types(&self) -> Vec<&TruckType> {
        truck_types_for(&self.truck_types, self.loading_mode)
    }

    /// Changes the mode and picks its first truck type, or none if the
    /// catalog has no truck for that mode.
    pub fn switch_loading_mode(&mut self, mode: LoadingMode) {
        self.loading_mode = mode;
        self.truck_type = truck_types_for(&self.truck_types, mode)
            .first()
            .map(|t| t.name.clone())
            .unwrap_or_default();
    }

    /// Picks a truck type offered for the current mode. Returns false and
    /// keeps the previous choice otherwise.
    pub fn choose_truck_type(&mut self, name: &str) -> bool {
        let offered = self.available_truck_types().iter().any(|t| t.name == name);
        if offered {
            self.truck_type = name.to_string();
        }
        offered
    }

    pub fn selected_carriers(&self) -> &[String] {
        &self.selected_carriers
    }

    pub fn is_selected(&self, carrier: &str) -> bool {
        self.selected_carriers.iter().any(|c| c == carrier)
    }

    /// Flips a catalog carrier in or out of the invitation list and returns
    /// whether it is now selected. Unknown names are ignored.
    pub fn toggle_carrier(&mut self, carrier: &str) -> bool {
        if self.is_selected(carrier) {
            self.selected_carriers.retain(|c| c != carrier);
            return false;
        }
        if !self.carriers.iter().any(|c| c.name == carrier) {
            return false;
        }
        let mut selected = std::mem::take(&mut self.selected_carriers);
        selected.push(carrier.to_string());
        self.selected_carriers = self
            .carriers
            .iter()
            .filter(|c| selected.contains(&c.name))
            .map(|c| c.name.clone())
            .collect();
        true
    }

    pub fn select_all_carriers(&mut self) {
        self.selected_carriers = self.carriers.iter().map(|c| c.name.clone()).collect();
    }

    pub fn clear_carriers(&mut self) {
        self.selected_carriers.clear();
    }

    /// The request to submit. Validation happens when the record is opened.
    pub fn to_request(&self) -> QuotationRequest {
        let route_info = self.route_info.trim();
        QuotationRequest {
            map_number: self.map_number.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            total_km: self.total_km,
            weight: self.weight,
            map_value: self.map_value,
            truck_type: self.truck_type.clone(),
            loading_mode: self.loading_mode,
            route_info: (!route_info.is_empty()).then(|| route_info.to_string()),
            map_image_url: self.map_image_url.clone(),
            loading_date: self.loading_date,
            carriers: self.selected_carriers.clone(),
        }
    }
}
