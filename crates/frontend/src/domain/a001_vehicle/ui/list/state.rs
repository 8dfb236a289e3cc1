use crate::shared::list_state::ListState;
use crate::shared::list_utils::{contains_folded, locale_cmp, Searchable, Sortable};
use contracts::domain::a001_vehicle::aggregate::{fields, Vehicle};
use leptos::prelude::*;
use std::cmp::Ordering;

impl Searchable for Vehicle {
    fn matches_filter(&self, folded_query: &str) -> bool {
        contains_folded(&self.plate, folded_query)
            || contains_folded(&self.brand, folded_query)
            || contains_folded(&self.model, folded_query)
    }
}

impl Sortable for Vehicle {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            fields::PLATE => locale_cmp(&self.plate, &other.plate),
            fields::BRAND => locale_cmp(&self.brand, &other.brand),
            fields::MODEL => locale_cmp(&self.model, &other.model),
            fields::YEAR => self.year.cmp(&other.year),
            fields::ODOMETER => self.odometer.total_cmp(&other.odometer),
            _ => Ordering::Equal,
        }
    }
}

/// Vehicles are kept ordered by plate
pub fn sort_by_plate(items: &mut Vec<Vehicle>) {
    items.sort_by(|a, b| locale_cmp(&a.plate, &b.plate));
}

pub fn create_state() -> RwSignal<ListState<Vehicle>> {
    RwSignal::new(ListState::new(fields::PLATE))
}
