use crate::shared::date_utils::{format_date, format_thousands};
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{contains_folded, filter_list, locale_cmp, sort_list, Searchable, Sortable};
use contracts::domain::a001_vehicle::aggregate::Vehicle;
use contracts::domain::a004_maintenance::aggregate::MaintenanceType;
use contracts::domain::a005_scheduled_maintenance::aggregate::ScheduledMaintenance;
use leptos::prelude::*;
use std::cmp::Ordering;

pub const PLATE_COLUMN: &str = "vehiculoPatente";
pub const DATE_COLUMN: &str = "fechaProgramada";
pub const DESCRIPTION_COLUMN: &str = "descripcion";

/// A plan entry with plate and description resolved for display.
///
/// Plans sent by the scheduling endpoint carry `vehiculo_id` and `tipo_id`
/// only, so the plate comes from the vehicles list and the type name stands
/// in for a missing description.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub record: ScheduledMaintenance,
    pub plate: Option<String>,
    pub description: Option<String>,
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

impl ScheduleRow {
    pub fn resolve(record: &ScheduledMaintenance, vehicles: &[Vehicle], types: &[MaintenanceType]) -> Self {
        let plate = non_blank(record.vehicle_plate.as_deref()).or_else(|| {
            let id = record.vehicle_id?;
            vehicles.iter().find(|v| v.id == id).map(|v| v.plate.clone())
        });
        let description = non_blank(record.description.as_deref()).or_else(|| {
            let id = record.type_id?;
            types.iter().find(|t| t.id == id).map(|t| t.name.clone())
        });
        Self {
            record: record.clone(),
            plate,
            description,
        }
    }

    /// One line of the plan: "AB1234 - 01-09-2024 - Cambio de aceite".
    /// Missing parts are left out along with their separator.
    pub fn summary(&self) -> String {
        [
            self.plate.clone(),
            self.record.display_date().map(format_date),
            self.description.clone(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" - ")
    }

    /// Planning details, when the backend sends them
    pub fn frequency(&self) -> Option<String> {
        let item = &self.record;
        let parts: Vec<String> = [
            item.every_km.map(|km| format!("cada {} km", format_thousands(km as f64))),
            item.every_months.map(|m| format!("cada {} meses", m)),
            item.next_odometer.map(|km| format!("próximo a los {} km", format_thousands(km as f64))),
        ]
        .into_iter()
        .flatten()
        .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

impl Searchable for ScheduleRow {
    fn matches_filter(&self, folded_query: &str) -> bool {
        contains_folded(self.plate.as_deref().unwrap_or(""), folded_query)
            || contains_folded(self.description.as_deref().unwrap_or(""), folded_query)
    }
}

impl Sortable for ScheduleRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        match field {
            PLATE_COLUMN => locale_cmp(&text(&self.plate), &text(&other.plate)),
            DATE_COLUMN => self.record.display_date().cmp(&other.record.display_date()),
            DESCRIPTION_COLUMN => locale_cmp(&text(&self.description), &text(&other.description)),
            _ => Ordering::Equal,
        }
    }
}

/// Resolved, filtered and sorted rows of the plan
pub fn visible_rows(
    state: &ListState<ScheduledMaintenance>,
    vehicles: &[Vehicle],
    types: &[MaintenanceType],
) -> Vec<ScheduleRow> {
    let rows: Vec<_> = state
        .items
        .iter()
        .map(|s| ScheduleRow::resolve(s, vehicles, types))
        .collect();
    let mut shown = filter_list(&rows, &state.filter);
    sort_list(&mut shown, &state.sort_field, state.sort_ascending);
    shown
}

pub fn keep_order(_items: &mut Vec<ScheduledMaintenance>) {}

pub fn create_state() -> RwSignal<ListState<ScheduledMaintenance>> {
    RwSignal::new(ListState::new(DATE_COLUMN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_vehicle::aggregate::VehicleId;
    use contracts::domain::a004_maintenance::aggregate::MaintenanceTypeId;

    fn parse(raw: &str) -> ScheduledMaintenance {
        serde_json::from_str(raw).unwrap()
    }

    fn vehicles() -> Vec<Vehicle> {
        vec![Vehicle {
            id: VehicleId(4),
            plate: "KDJT22".into(),
            brand: "Toyota".into(),
            model: "Yaris".into(),
            year: 2021,
            odometer: 30000.0,
        }]
    }

    fn types() -> Vec<MaintenanceType> {
        vec![MaintenanceType {
            id: MaintenanceTypeId(1),
            name: "Cambio de aceite".into(),
        }]
    }

    #[test]
    fn test_summary_line() {
        let item = parse(r#"{"id":1,"vehiculoPatente":"AB1234","fechaProgramada":"2024-09-01","descripcion":"Cambio de aceite"}"#);
        let row = ScheduleRow::resolve(&item, &[], &[]);
        assert_eq!(row.summary(), "AB1234 - 01-09-2024 - Cambio de aceite");
        assert_eq!(row.frequency(), None);
    }

    #[test]
    fn test_plan_resolves_plate_and_type_from_ids() {
        let item = parse(
            r#"{"id":2,"vehiculo_id":4,"tipo_id":1,"frecuencia_km":10000,"frecuencia_meses":6,
                "ultima_fecha":null,"ultima_kilometraje":null,
                "siguiente_fecha_estimada":"2024-12-01","siguiente_kilometraje_estimado":null}"#,
        );
        let row = ScheduleRow::resolve(&item, &vehicles(), &types());
        assert_eq!(row.plate.as_deref(), Some("KDJT22"));
        assert_eq!(row.summary(), "KDJT22 - 01-12-2024 - Cambio de aceite");
        assert_eq!(row.frequency().as_deref(), Some("cada 10.000 km, cada 6 meses"));
    }

    #[test]
    fn test_missing_parts_leave_no_dangling_separators() {
        let bare = ScheduleRow::resolve(&parse(r#"{"id":3,"vehiculo_id":99}"#), &vehicles(), &types());
        assert_eq!(bare.plate, None);
        assert_eq!(bare.summary(), "");

        let dated = ScheduleRow::resolve(&parse(r#"{"id":4,"fechaProgramada":"2024-09-01"}"#), &[], &[]);
        assert_eq!(dated.summary(), "01-09-2024");
    }

    #[test]
    fn test_sorted_by_date_with_missing_dates_first() {
        let mut state = ListState::new(DATE_COLUMN);
        state.items = vec![
            parse(r#"{"id":1,"fechaProgramada":"2024-09-01"}"#),
            parse(r#"{"id":2}"#),
            parse(r#"{"id":3,"siguiente_fecha_estimada":"2024-07-01"}"#),
        ];
        let ids: Vec<i64> = visible_rows(&state, &[], &[]).iter().map(|r| r.record.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_filter_matches_resolved_plate() {
        let mut state = ListState::new(DATE_COLUMN);
        state.items = vec![
            parse(r#"{"id":1,"vehiculo_id":4,"tipo_id":1}"#),
            parse(r#"{"id":2,"vehiculoPatente":"ZZ9999"}"#),
        ];
        state.filter = "kdjt".into();
        let rows = visible_rows(&state, &vehicles(), &types());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.id.0, 1);
    }
}
