use crate::domain::a001_vehicle::aggregate::VehicleId;
use crate::domain::a002_supplier::aggregate::SupplierId;
use crate::domain::common::{AggregateId, AggregateRoot};
use crate::shared::validation::{
    field_value, parse_number, parse_whole_number, Draft, FieldSpec, Rule, DATE_FORMAT,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Types
// ============================================================================

crate::aggregate_id!(
    /// Backend id of a maintenance record
    MaintenanceId
);

crate::aggregate_id!(
    /// Backend id of a maintenance type
    MaintenanceTypeId
);

// ============================================================================
// Form fields
// ============================================================================

pub mod fields {
    pub const VEHICLE: &str = "vehiculo_id";
    pub const KIND: &str = "tipo_id";
    pub const DESCRIPTION: &str = "descripcion";
    pub const DATE: &str = "fecha";
    pub const ODOMETER: &str = "kilometraje";
    pub const COST: &str = "costo";
    pub const SUPPLIER: &str = "proveedor_id";
}

pub const DESCRIPTION_MAX_LEN: usize = 500;

const POSITIVE_MESSAGE: &str = "Debe ser un número positivo";
const WHOLE_MESSAGE: &str = "Debe ser un número entero";

pub const MAINTENANCE_RULES: &[FieldSpec] = &[
    FieldSpec::required(fields::VEHICLE, &[]),
    FieldSpec::required(fields::KIND, &[]),
    FieldSpec::optional(
        fields::DESCRIPTION,
        &[Rule::MaxLen {
            max: DESCRIPTION_MAX_LEN,
            message: "Máximo 500 caracteres",
        }],
    ),
    FieldSpec::required(
        fields::DATE,
        &[Rule::NotAfterToday {
            message: "La fecha no puede ser futura",
        }],
    ),
    FieldSpec::required(
        fields::ODOMETER,
        &[
            Rule::Number {
                min: 0.0,
                inclusive: false,
                message: POSITIVE_MESSAGE,
            },
            Rule::WholeNumber {
                message: WHOLE_MESSAGE,
            },
        ],
    ),
    FieldSpec::required(
        fields::COST,
        &[Rule::Number {
            min: 0.0,
            inclusive: false,
            message: POSITIVE_MESSAGE,
        }],
    ),
    FieldSpec::required(fields::SUPPLIER, &[]),
];

// ============================================================================
// Reference data
// ============================================================================

/// Entry of `GET /mantenciones/tipos_mantencion`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceType {
    pub id: MaintenanceTypeId,

    #[serde(rename = "nombre")]
    pub name: String,
}

/// The types endpoint answers either a bare array or `{ "tipos": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaintenanceTypesResponse {
    List(Vec<MaintenanceType>),
    Wrapped { tipos: Vec<MaintenanceType> },
}

impl MaintenanceTypesResponse {
    pub fn into_vec(self) -> Vec<MaintenanceType> {
        match self {
            Self::List(items) | Self::Wrapped { tipos: items } => items,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Maintenance record as returned by `GET /mantenciones`.
///
/// The listing omits `id`; only records coming back from a create or an
/// update carry it, so only those can be edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MaintenanceId>,

    #[serde(rename = "vehiculo_id")]
    pub vehicle_id: VehicleId,

    #[serde(rename = "tipo_id")]
    pub type_id: MaintenanceTypeId,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "fecha")]
    pub date: NaiveDate,

    #[serde(rename = "kilometraje")]
    pub odometer: f64,

    #[serde(rename = "costo")]
    pub cost: f64,

    #[serde(rename = "proveedor_id")]
    pub supplier_id: SupplierId,
}

impl Maintenance {
    pub fn to_draft(&self) -> Draft {
        let mut draft = Draft::new();
        draft.insert(fields::VEHICLE.into(), self.vehicle_id.as_string());
        draft.insert(fields::KIND.into(), self.type_id.as_string());
        draft.insert(
            fields::DESCRIPTION.into(),
            self.description.clone().unwrap_or_default(),
        );
        draft.insert(fields::DATE.into(), self.date.format(DATE_FORMAT).to_string());
        draft.insert(fields::ODOMETER.into(), self.odometer.to_string());
        draft.insert(fields::COST.into(), self.cost.to_string());
        draft.insert(fields::SUPPLIER.into(), self.supplier_id.as_string());
        draft
    }

    /// Description for the list, cut to the stored maximum
    pub fn description_preview(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.chars().take(DESCRIPTION_MAX_LEN).collect(),
            _ => "Sin descripción".to_string(),
        }
    }
}

impl AggregateRoot for Maintenance {
    type Id = MaintenanceId;

    fn id(&self) -> Option<Self::Id> {
        self.id
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "mantenciones"
    }

    fn element_name() -> &'static str {
        "Mantención"
    }

    fn list_name() -> &'static str {
        "Mantenciones"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Body of `POST /mantenciones` and `PUT /mantenciones/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceDto {
    #[serde(rename = "vehiculo_id")]
    pub vehicle_id: VehicleId,

    #[serde(rename = "tipo_id")]
    pub type_id: MaintenanceTypeId,

    #[serde(rename = "descripcion")]
    pub description: Option<String>,

    #[serde(rename = "fecha")]
    pub date: NaiveDate,

    #[serde(rename = "kilometraje")]
    pub odometer: i64,

    #[serde(rename = "costo")]
    pub cost: f64,

    #[serde(rename = "proveedor_id")]
    pub supplier_id: SupplierId,
}

impl MaintenanceDto {
    /// Build the payload from a draft that passed [`MAINTENANCE_RULES`]
    pub fn from_draft(draft: &Draft) -> Result<Self, String> {
        let number = |field: &str| {
            parse_number(field_value(draft, field)).ok_or_else(|| format!("Valor inválido en {}", field))
        };
        let description = field_value(draft, fields::DESCRIPTION);

        Ok(Self {
            vehicle_id: VehicleId::from_string(field_value(draft, fields::VEHICLE))?,
            type_id: MaintenanceTypeId::from_string(field_value(draft, fields::KIND))?,
            description: (!description.is_empty()).then(|| description.to_string()),
            date: NaiveDate::parse_from_str(field_value(draft, fields::DATE), DATE_FORMAT)
                .map_err(|e| format!("Fecha inválida: {}", e))?,
            odometer: parse_whole_number(field_value(draft, fields::ODOMETER))
                .ok_or_else(|| format!("Valor inválido en {}", fields::ODOMETER))?,
            cost: number(fields::COST)?,
            supplier_id: SupplierId::from_string(field_value(draft, fields::SUPPLIER))?,
        })
    }
}
