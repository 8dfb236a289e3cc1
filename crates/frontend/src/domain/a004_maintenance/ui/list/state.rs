use crate::shared::date_utils::format_date;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{contains_folded, filter_list, locale_cmp, sort_list, Searchable, Sortable};
use contracts::domain::a001_vehicle::aggregate::Vehicle;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a004_maintenance::aggregate::{fields, Maintenance, MaintenanceType};
use contracts::shared::validation::DATE_FORMAT;
use leptos::prelude::*;
use std::cmp::Ordering;

pub const UNKNOWN: &str = "Desconocido";

/// A maintenance record with its references resolved for display
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRow {
    pub record: Maintenance,
    pub plate: String,
    pub kind: String,
    pub supplier: String,
    pub description: String,
    pub date: String,
}

impl MaintenanceRow {
    pub fn resolve(
        record: &Maintenance,
        vehicles: &[Vehicle],
        types: &[MaintenanceType],
        suppliers: &[Supplier],
    ) -> Self {
        let or_unknown = |name: Option<&String>| name.cloned().unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            plate: or_unknown(vehicles.iter().find(|v| v.id == record.vehicle_id).map(|v| &v.plate)),
            kind: or_unknown(types.iter().find(|t| t.id == record.type_id).map(|t| &t.name)),
            supplier: or_unknown(suppliers.iter().find(|s| s.id == record.supplier_id).map(|s| &s.name)),
            description: record.description_preview(),
            date: format_date(&record.date.format(DATE_FORMAT).to_string()),
            record: record.clone(),
        }
    }
}

impl Searchable for MaintenanceRow {
    fn matches_filter(&self, folded_query: &str) -> bool {
        contains_folded(&self.plate, folded_query)
            || contains_folded(&self.kind, folded_query)
            || contains_folded(&self.supplier, folded_query)
            || contains_folded(&self.description, folded_query)
    }
}

impl Sortable for MaintenanceRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            fields::VEHICLE => locale_cmp(&self.plate, &other.plate),
            fields::KIND => locale_cmp(&self.kind, &other.kind),
            fields::SUPPLIER => locale_cmp(&self.supplier, &other.supplier),
            fields::DESCRIPTION => locale_cmp(&self.description, &other.description),
            fields::DATE => self.record.date.cmp(&other.record.date),
            fields::ODOMETER => self.record.odometer.total_cmp(&other.record.odometer),
            fields::COST => self.record.cost.total_cmp(&other.record.cost),
            _ => Ordering::Equal,
        }
    }
}

/// Resolved, filtered and sorted rows of the table
pub fn visible_rows(
    state: &ListState<Maintenance>,
    vehicles: &[Vehicle],
    types: &[MaintenanceType],
    suppliers: &[Supplier],
) -> Vec<MaintenanceRow> {
    let rows: Vec<_> = state
        .items
        .iter()
        .map(|m| MaintenanceRow::resolve(m, vehicles, types, suppliers))
        .collect();
    let mut shown = filter_list(&rows, &state.filter);
    sort_list(&mut shown, &state.sort_field, state.sort_ascending);
    shown
}

/// Records stay in backend order
pub fn keep_order(_items: &mut Vec<Maintenance>) {}

/// Newest first
fn initial_state() -> ListState<Maintenance> {
    let mut state = ListState::new(fields::DATE);
    state.sort_ascending = false;
    state
}

pub fn create_state() -> RwSignal<ListState<Maintenance>> {
    RwSignal::new(initial_state())
}
