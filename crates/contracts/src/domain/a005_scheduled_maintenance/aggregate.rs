use crate::domain::a001_vehicle::aggregate::VehicleId;
use crate::domain::a004_maintenance::aggregate::MaintenanceTypeId;
use crate::domain::common::AggregateRoot;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// Backend id of a maintenance plan
    ScheduledMaintenanceId
);

/// Planned maintenance, read-only on the client.
///
/// The list shows plate, date and description; the planning fields are kept
/// when the backend sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMaintenance {
    pub id: ScheduledMaintenanceId,

    #[serde(rename = "vehiculoPatente", default)]
    pub vehicle_plate: Option<String>,

    #[serde(rename = "fechaProgramada", default)]
    pub scheduled_date: Option<String>,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "vehiculo_id", default)]
    pub vehicle_id: Option<VehicleId>,

    #[serde(rename = "tipo_id", default)]
    pub type_id: Option<MaintenanceTypeId>,

    #[serde(rename = "frecuencia_km", default)]
    pub every_km: Option<i64>,

    #[serde(rename = "frecuencia_meses", default)]
    pub every_months: Option<i64>,

    #[serde(rename = "siguiente_fecha_estimada", default)]
    pub next_date: Option<String>,

    #[serde(rename = "siguiente_kilometraje_estimado", default)]
    pub next_odometer: Option<i64>,
}

impl ScheduledMaintenance {
    /// Scheduled date, falling back to the estimated next date
    pub fn display_date(&self) -> Option<&str> {
        self.scheduled_date
            .as_deref()
            .or(self.next_date.as_deref())
    }
}

impl AggregateRoot for ScheduledMaintenance {
    type Id = ScheduledMaintenanceId;

    fn id(&self) -> Option<Self::Id> {
        Some(self.id)
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "programar-mantenciones"
    }

    fn element_name() -> &'static str {
        "Mantención programada"
    }

    fn list_name() -> &'static str {
        "Programación de mantenciones"
    }
}
