use crate::domain::common::AggregateRoot;
use crate::shared::validation::{field_value, parse_whole_number, Draft, FieldSpec, Rule};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::aggregate_id!(
    /// Backend id of a vehicle
    VehicleId
);

// ============================================================================
// Form fields
// ============================================================================

pub mod fields {
    pub const PLATE: &str = "patente";
    pub const BRAND: &str = "marca";
    pub const MODEL: &str = "modelo";
    pub const YEAR: &str = "anio";
    pub const ODOMETER: &str = "kilometraje";
}

/// Oldest accepted model year
pub const MIN_YEAR: i32 = 1950;

/// Plates are at most six characters long
pub const PLATE_MAX_LEN: usize = 6;

pub const ODOMETER_WHOLE_MESSAGE: &str = "El kilometraje debe ser un número entero.";

pub const PLATE_FORMAT_MESSAGE: &str =
    "Patente inválida. Formato chileno, por ejemplo: AB1234 o ABC12";

// Two letters + four digits (old format) or three letters + two digits
static PLATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Z]{2}[0-9]{4}|[A-Z]{3}[0-9]{2})$").expect("plate pattern is valid")
});

/// Uppercase and cut to [`PLATE_MAX_LEN`] characters.
pub fn normalize_plate(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .take(PLATE_MAX_LEN)
        .collect()
}

/// Whether an already-normalized plate has a canonical format.
pub fn is_valid_plate(plate: &str) -> bool {
    PLATE_PATTERN.is_match(plate)
}

/// Odometer readings may only go up between edits.
pub fn check_odometer(original: f64, updated: f64) -> Result<(), String> {
    if updated < original {
        return Err(format!(
            "El kilometraje nuevo debe ser mayor o igual al actual ({}).",
            original
        ));
    }
    Ok(())
}

/// Rule table applied when the user presses "save".
///
/// Brand, model and year may still be empty here: the plate lookup can
/// backfill them before the request is built, see [`VEHICLE_FINAL_RULES`].
pub const VEHICLE_RULES: &[FieldSpec] = &[
    FieldSpec::required(
        fields::PLATE,
        &[Rule::Format {
            check: is_valid_plate,
            message: PLATE_FORMAT_MESSAGE,
        }],
    ),
    FieldSpec::optional(fields::BRAND, &[Rule::MaxLen { max: 50, message: "Máximo 50 caracteres" }]),
    FieldSpec::optional(fields::MODEL, &[Rule::MaxLen { max: 50, message: "Máximo 50 caracteres" }]),
    FieldSpec::optional(fields::YEAR, &[Rule::Year { min: MIN_YEAR }]),
    FieldSpec::required(
        fields::ODOMETER,
        &[
            Rule::Number {
                min: 0.0,
                inclusive: true,
                message: "El kilometraje debe ser un número positivo.",
            },
            Rule::WholeNumber {
                message: ODOMETER_WHOLE_MESSAGE,
            },
        ],
    ),
];

/// Rule table checked after enrichment, right before the payload is built.
pub const VEHICLE_FINAL_RULES: &[FieldSpec] = &[
    FieldSpec::required(
        fields::PLATE,
        &[Rule::Format {
            check: is_valid_plate,
            message: PLATE_FORMAT_MESSAGE,
        }],
    ),
    FieldSpec::required(fields::BRAND, &[Rule::MaxLen { max: 50, message: "Máximo 50 caracteres" }]),
    FieldSpec::required(fields::MODEL, &[Rule::MaxLen { max: 50, message: "Máximo 50 caracteres" }]),
    FieldSpec::required(fields::YEAR, &[Rule::Year { min: MIN_YEAR }]),
    FieldSpec::required(
        fields::ODOMETER,
        &[
            Rule::Number {
                min: 0.0,
                inclusive: true,
                message: "El kilometraje debe ser un número positivo.",
            },
            Rule::WholeNumber {
                message: ODOMETER_WHOLE_MESSAGE,
            },
        ],
    ),
];

// ============================================================================
// Aggregate Root
// ============================================================================

/// Vehicle as returned by `GET /vehiculos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,

    #[serde(rename = "patente")]
    pub plate: String,

    #[serde(rename = "marca")]
    pub brand: String,

    #[serde(rename = "modelo")]
    pub model: String,

    #[serde(rename = "anio")]
    pub year: i32,

    #[serde(rename = "kilometraje", default)]
    pub odometer: f64,
}

impl Vehicle {
    /// Draft used when the edit form opens
    pub fn to_draft(&self) -> Draft {
        let mut draft = Draft::new();
        draft.insert(fields::PLATE.into(), self.plate.clone());
        draft.insert(fields::BRAND.into(), self.brand.clone());
        draft.insert(fields::MODEL.into(), self.model.clone());
        draft.insert(fields::YEAR.into(), self.year.to_string());
        draft.insert(fields::ODOMETER.into(), self.odometer.to_string());
        draft
    }
}

impl AggregateRoot for Vehicle {
    type Id = VehicleId;

    fn id(&self) -> Option<Self::Id> {
        Some(self.id)
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "vehiculos"
    }

    fn element_name() -> &'static str {
        "Vehículo"
    }

    fn list_name() -> &'static str {
        "Vehículos"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Body of `POST /vehiculos` and `PUT /vehiculos/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDto {
    #[serde(rename = "patente")]
    pub plate: String,

    #[serde(rename = "marca")]
    pub brand: String,

    #[serde(rename = "modelo")]
    pub model: String,

    #[serde(rename = "anio")]
    pub year: i32,

    #[serde(rename = "kilometraje")]
    pub odometer: i64,
}

impl VehicleDto {
    /// Build the payload from a draft that passed [`VEHICLE_FINAL_RULES`]
    pub fn from_draft(draft: &Draft) -> Result<Self, String> {
        let year = field_value(draft, fields::YEAR)
            .parse::<i32>()
            .map_err(|e| format!("Año inválido: {}", e))?;
        let odometer = parse_whole_number(field_value(draft, fields::ODOMETER))
            .ok_or_else(|| "Kilometraje inválido".to_string())?;

        Ok(Self {
            plate: normalize_plate(field_value(draft, fields::PLATE)),
            brand: field_value(draft, fields::BRAND).to_string(),
            model: field_value(draft, fields::MODEL).to_string(),
            year,
            odometer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::{validate, ValidationContext, REQUIRED_MESSAGE};
    use chrono::NaiveDate;

    fn ctx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn test_plate_is_uppercased_and_truncated_before_matching() {
        let plate = normalize_plate("ab1234");
        assert_eq!(plate, "AB1234");
        assert!(is_valid_plate(&plate));

        let plate = normalize_plate("abcdef1");
        assert_eq!(plate, "ABCDEF");
        assert!(!is_valid_plate(&plate));
    }

    #[test]
    fn test_both_plate_formats_are_accepted() {
        assert!(is_valid_plate("AB1234"));
        assert!(is_valid_plate("ABC12"));
        assert!(!is_valid_plate("A12345"));
        assert!(!is_valid_plate("ab1234"));
        assert!(!is_valid_plate(""));
    }

    #[test]
    fn test_odometer_cannot_go_down() {
        assert!(check_odometer(1000.0, 1000.0).is_ok());
        assert!(check_odometer(1000.0, 1500.5).is_ok());
        assert!(check_odometer(1000.0, 999.0).is_err());
    }

    #[test]
    fn test_final_rules_require_identifying_fields() {
        let mut draft = Draft::new();
        draft.insert(fields::PLATE.into(), "ABC12".into());
        draft.insert(fields::ODOMETER.into(), "0".into());

        assert!(validate(VEHICLE_RULES, &draft, &ctx()).is_empty());

        let errors = validate(VEHICLE_FINAL_RULES, &draft, &ctx());
        assert_eq!(errors.get(fields::BRAND).map(String::as_str), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get(fields::YEAR).map(String::as_str), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_dto_from_draft_matches_wire_names() {
        let vehicle = Vehicle {
            id: VehicleId(9),
            plate: "AB1234".into(),
            brand: "Toyota".into(),
            model: "Hilux".into(),
            year: 2020,
            odometer: 15000.0,
        };
        let dto = VehicleDto::from_draft(&vehicle.to_draft()).unwrap();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["patente"], "AB1234");
        assert_eq!(json["anio"], 2020);
        assert_eq!(json["kilometraje"], 15000);
    }

    #[test]
    fn test_fractional_odometer_is_rejected_before_the_payload() {
        let mut draft = Draft::new();
        draft.insert(fields::PLATE.into(), "ABC12".into());
        draft.insert(fields::BRAND.into(), "Kia".into());
        draft.insert(fields::MODEL.into(), "Rio".into());
        draft.insert(fields::YEAR.into(), "2019".into());
        draft.insert(fields::ODOMETER.into(), "1500,5".into());

        let errors = validate(VEHICLE_RULES, &draft, &ctx());
        assert_eq!(errors.get(fields::ODOMETER).map(String::as_str), Some(ODOMETER_WHOLE_MESSAGE));
        assert_eq!(VehicleDto::from_draft(&draft), Err("Kilometraje inválido".to_string()));
    }

    #[test]
    fn test_vehicle_deserializes_backend_record() {
        let raw = r#"{"id":1,"patente":"ABC12","marca":"Kia","modelo":"Rio","anio":2019,"kilometraje":42000}"#;
        let vehicle: Vehicle = serde_json::from_str(raw).unwrap();
        assert_eq!(vehicle.id, VehicleId(1));
        assert_eq!(vehicle.odometer, 42000.0);
    }
}
