use crate::shared::api::{DeleteMessages, EntityMessages};
use crate::shared::form::{Enrich, FormSchema};
use crate::shared::lookup::PlateLookup;
use async_trait::async_trait;
use contracts::domain::a001_vehicle::aggregate::{
    check_odometer, fields, is_valid_plate, normalize_plate, Vehicle, VehicleDto,
    PLATE_FORMAT_MESSAGE, VEHICLE_FINAL_RULES, VEHICLE_RULES,
};
use contracts::shared::validation::{
    field_error, field_value, parse_number, Draft, FieldErrors, FieldSpec,
};

pub const VEHICLE_MESSAGES: EntityMessages = EntityMessages {
    created: "Vehículo agregado exitosamente.",
    updated: "Datos actualizados correctamente.",
    conflict: "Ya existe un vehículo con esa patente.",
    save_failed: "Error al guardar el vehículo.",
};

pub const VEHICLE_DELETE_MESSAGES: DeleteMessages = DeleteMessages {
    confirm: "¿Estás seguro de eliminar este vehículo?",
    deleted: "Vehículo eliminado.",
    dependency: "No se puede eliminar el vehículo porque tiene mantenciones asociadas.",
    failed: "Error al eliminar vehículo.",
};

pub const PLATE_NOT_FOUND_MESSAGE: &str = "Patente no encontrada en la base externa (GetAPI).";
pub const PLATE_SERVICE_DOWN_MESSAGE: &str =
    "No se pudo verificar la patente: el servicio externo no responde.";
pub const ODOMETER_CONFIRMATION: &str = "¿Deseas guardar los cambios en el kilometraje?";

pub struct VehicleForm;

impl FormSchema for VehicleForm {
    type Record = Vehicle;
    type Payload = VehicleDto;

    fn rules() -> &'static [FieldSpec] {
        VEHICLE_RULES
    }

    fn final_rules() -> &'static [FieldSpec] {
        VEHICLE_FINAL_RULES
    }

    fn messages() -> &'static EntityMessages {
        &VEHICLE_MESSAGES
    }

    fn draft_from(record: &Vehicle) -> Draft {
        record.to_draft()
    }

    fn normalize(field: &str, raw: &str) -> (String, Option<String>) {
        if field != fields::PLATE {
            return (raw.to_string(), None);
        }
        let plate = normalize_plate(raw);
        let advisory = (!plate.is_empty() && !is_valid_plate(&plate))
            .then(|| PLATE_FORMAT_MESSAGE.to_string());
        (plate, advisory)
    }

    /// Once created only the odometer can change
    fn is_locked(field: &str, editing: bool) -> bool {
        editing && field != fields::ODOMETER
    }

    fn business_check(draft: &Draft, original: Option<&Vehicle>, _existing: &[Vehicle]) -> FieldErrors {
        let (Some(original), Some(updated)) = (
            original,
            parse_number(field_value(draft, fields::ODOMETER)),
        ) else {
            return FieldErrors::new();
        };
        match check_odometer(original.odometer, updated) {
            Ok(()) => FieldErrors::new(),
            Err(message) => field_error(fields::ODOMETER, message),
        }
    }

    fn confirmation(_draft: &Draft, original: Option<&Vehicle>) -> Option<String> {
        original.map(|_| ODOMETER_CONFIRMATION.to_string())
    }

    fn payload(draft: &Draft) -> Result<VehicleDto, String> {
        VehicleDto::from_draft(draft)
    }
}

/// Checks the plate against the external registry and fills in brand,
/// model and year the user left empty. A miss or an outage blocks the save.
pub struct PlateEnrichment<L> {
    pub lookup: L,
}

fn backfill(draft: &mut Draft, field: &str, value: Option<String>) {
    if !field_value(draft, field).is_empty() {
        return;
    }
    if let Some(value) = value {
        draft.insert(field.to_string(), value);
    }
}

#[async_trait(?Send)]
impl<L: PlateLookup> Enrich for PlateEnrichment<L> {
    async fn enrich(&self, draft: &mut Draft) -> Result<(), FieldErrors> {
        let plate = normalize_plate(field_value(draft, fields::PLATE));
        match self.lookup.lookup_plate(&plate).await {
            Ok(Some(info)) => {
                backfill(draft, fields::BRAND, info.brand().map(str::to_string));
                backfill(draft, fields::MODEL, info.model().map(str::to_string));
                backfill(draft, fields::YEAR, info.year());
                Ok(())
            }
            Ok(None) => Err(field_error(fields::PLATE, PLATE_NOT_FOUND_MESSAGE)),
            Err(e) => {
                log::warn!("Consulta de patente {} falló: {}", plate, e);
                Err(field_error(fields::PLATE, PLATE_SERVICE_DOWN_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::{Method, RestClient};
    use crate::shared::form::{execute, FormState, SubmitOutcome};
    use crate::shared::lookup::PlateInfo;
    use crate::shared::testing::{FakePlateLookup, FakeTransport};
    use chrono::NaiveDate;
    use contracts::domain::a001_vehicle::aggregate::VehicleId;
    use contracts::shared::validation::ValidationContext;
    use serde_json::json;

    fn ctx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    fn hilux() -> Vehicle {
        Vehicle {
            id: VehicleId(5),
            plate: "AB1234".into(),
            brand: "Toyota".into(),
            model: "Hilux".into(),
            year: 2020,
            odometer: 15000.0,
        }
    }

    fn kia_info() -> PlateInfo {
        PlateInfo {
            make: Some("Kia".into()),
            model: Some("Rio".into()),
            year: Some(json!(2019)),
            ..PlateInfo::default()
        }
    }

    #[test]
    fn test_plate_input_is_normalized_with_advisory() {
        let mut form = FormState::<VehicleForm>::default();
        form.open_create();

        form.set_field(fields::PLATE, "ab1234");
        assert_eq!(form.value(fields::PLATE), "AB1234");
        assert_eq!(form.error(fields::PLATE), None);

        form.set_field(fields::PLATE, "abcdef1");
        assert_eq!(form.value(fields::PLATE), "ABCDEF");
        assert_eq!(form.error(fields::PLATE).as_deref(), Some(PLATE_FORMAT_MESSAGE));
    }

    #[test]
    fn test_only_odometer_is_editable_after_creation() {
        let mut form = FormState::<VehicleForm>::default();
        form.open_edit(&hilux());
        form.set_field(fields::PLATE, "ZZ9999");
        form.set_field(fields::BRAND, "Nissan");
        form.set_field(fields::ODOMETER, "16000");

        assert_eq!(form.value(fields::PLATE), "AB1234");
        assert_eq!(form.value(fields::BRAND), "Toyota");
        assert_eq!(form.value(fields::ODOMETER), "16000");
    }

    #[test]
    fn test_odometer_decrease_is_blocked_locally() {
        let mut form = FormState::<VehicleForm>::default();
        form.open_edit(&hilux());
        form.set_field(fields::ODOMETER, "14000");

        assert!(form.prepare_submit(&ctx(), &[]).is_none());
        assert!(form.error(fields::ODOMETER).unwrap().contains("15000"));
    }

    #[tokio::test]
    async fn test_lookup_backfills_empty_fields_before_request() {
        let fake = FakeTransport::new();
        fake.push_json(
            201,
            json!({"id": 8, "patente": "ABC12", "marca": "Kia", "modelo": "Rio", "anio": 2019, "kilometraje": 500}),
        );
        let api = RestClient::new(fake.clone(), "http://api");
        let plates = FakePlateLookup::found(kia_info());

        let mut form = FormState::<VehicleForm>::default();
        form.open_create();
        form.set_field(fields::PLATE, "abc12");
        form.set_field(fields::MODEL, "Rio 5");
        form.set_field(fields::ODOMETER, "500");

        let request = form.prepare_submit(&ctx(), &[]).unwrap();
        let enrich = PlateEnrichment { lookup: plates.clone() };
        let outcome = execute(&api, request, &enrich, &ctx(), &|_| true).await;
        assert!(matches!(outcome, SubmitOutcome::Saved { edited: None, .. }));

        let sent = &fake.requests()[0];
        assert_eq!(sent.method, Method::Post);
        let body = sent.body.clone().unwrap();
        assert_eq!(body["marca"], "Kia");
        assert_eq!(body["modelo"], "Rio 5");
        assert_eq!(body["anio"], 2019);
        assert_eq!(plates.calls(), vec!["ABC12".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_plate_blocks_with_its_own_message() {
        let fake = FakeTransport::new();
        let api = RestClient::new(fake.clone(), "http://api");
        let plates = FakePlateLookup::missing();

        let mut form = FormState::<VehicleForm>::default();
        form.open_create();
        form.set_field(fields::PLATE, "ZZ9999");
        form.set_field(fields::ODOMETER, "0");

        let request = form.prepare_submit(&ctx(), &[]).unwrap();
        let outcome = execute(&api, request, &PlateEnrichment { lookup: plates.clone() }, &ctx(), &|_| true).await;
        form.complete_submit(outcome);

        assert_eq!(form.error(fields::PLATE).as_deref(), Some(PLATE_NOT_FOUND_MESSAGE));
        assert_ne!(PLATE_NOT_FOUND_MESSAGE, PLATE_FORMAT_MESSAGE);
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_registry_blocks_submit() {
        let fake = FakeTransport::new();
        let api = RestClient::new(fake.clone(), "http://api");
        let plates = FakePlateLookup::unreachable();

        let mut form = FormState::<VehicleForm>::default();
        form.open_create();
        form.set_field(fields::PLATE, "AB1234");
        form.set_field(fields::BRAND, "Toyota");
        form.set_field(fields::MODEL, "Hilux");
        form.set_field(fields::YEAR, "2020");
        form.set_field(fields::ODOMETER, "10");

        let request = form.prepare_submit(&ctx(), &[]).unwrap();
        let outcome = execute(&api, request, &PlateEnrichment { lookup: plates.clone() }, &ctx(), &|_| true).await;
        form.complete_submit(outcome);

        assert_eq!(form.error(fields::PLATE).as_deref(), Some(PLATE_SERVICE_DOWN_MESSAGE));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_registry_without_year_leaves_final_rules_blocking() {
        let fake = FakeTransport::new();
        let api = RestClient::new(fake.clone(), "http://api");
        let plates = FakePlateLookup::found(PlateInfo {
            manufacturer: Some("Fiat".into()),
            model: Some("Uno".into()),
            ..PlateInfo::default()
        });

        let mut form = FormState::<VehicleForm>::default();
        form.open_create();
        form.set_field(fields::PLATE, "ABC12");
        form.set_field(fields::ODOMETER, "10");

        let request = form.prepare_submit(&ctx(), &[]).unwrap();
        let outcome = execute(&api, request, &PlateEnrichment { lookup: plates.clone() }, &ctx(), &|_| true).await;
        form.complete_submit(outcome);

        assert_eq!(form.value(fields::BRAND), "Fiat");
        assert!(form.error(fields::YEAR).is_some());
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_edit_asks_before_saving_odometer() {
        let fake = FakeTransport::new();
        fake.push_json(
            200,
            json!({"id": 5, "patente": "AB1234", "marca": "Toyota", "modelo": "Hilux", "anio": 2020, "kilometraje": 16000}),
        );
        let api = RestClient::new(fake.clone(), "http://api");
        let plates = FakePlateLookup::found(PlateInfo::default());

        let mut form = FormState::<VehicleForm>::default();
        form.open_edit(&hilux());
        form.set_field(fields::ODOMETER, "16000");
        let request = form.prepare_submit(&ctx(), &[]).unwrap();
        assert_eq!(request.confirmation.as_deref(), Some(ODOMETER_CONFIRMATION));

        let outcome = execute(&api, request, &PlateEnrichment { lookup: plates.clone() }, &ctx(), &|_| true).await;
        let (edited, record) = form.complete_submit(outcome).unwrap();
        assert_eq!(edited, Some(VehicleId(5)));
        assert_eq!(record.odometer, 16000.0);
        assert_eq!(fake.requests()[0].url, "http://api/vehiculos/5");
    }
}
