use crate::shared::api::EntityMessages;
use crate::shared::form::FormSchema;
use contracts::domain::a004_maintenance::aggregate::{Maintenance, MaintenanceDto, MAINTENANCE_RULES};
use contracts::shared::validation::{Draft, FieldSpec};

pub const MAINTENANCE_MESSAGES: EntityMessages = EntityMessages {
    created: "Mantención registrada correctamente.",
    updated: "Mantención actualizada correctamente.",
    conflict: "Ya existe una mantención con esos datos.",
    save_failed: "Error al guardar mantención",
};

pub const CREATE_CONFIRMATION: &str = "¿Confirma registrar la mantención?";
pub const EDIT_CONFIRMATION: &str = "¿Confirma editar la mantención?";

pub struct MaintenanceForm;

impl FormSchema for MaintenanceForm {
    type Record = Maintenance;
    type Payload = MaintenanceDto;

    fn rules() -> &'static [FieldSpec] {
        MAINTENANCE_RULES
    }

    fn messages() -> &'static EntityMessages {
        &MAINTENANCE_MESSAGES
    }

    fn draft_from(record: &Maintenance) -> Draft {
        record.to_draft()
    }

    /// Every maintenance save is confirmed, new or not
    fn confirmation(_draft: &Draft, original: Option<&Maintenance>) -> Option<String> {
        Some(match original {
            Some(_) => EDIT_CONFIRMATION.to_string(),
            None => CREATE_CONFIRMATION.to_string(),
        })
    }

    fn payload(draft: &Draft) -> Result<MaintenanceDto, String> {
        MaintenanceDto::from_draft(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::{Method, RestClient};
    use crate::shared::form::{execute, FormState, NoEnrichment, SubmitOutcome};
    use crate::shared::list_state::ListState;
    use crate::shared::testing::FakeTransport;
    use chrono::NaiveDate;
    use contracts::domain::a004_maintenance::aggregate::{fields, MaintenanceId};
    use contracts::shared::validation::ValidationContext;
    use serde_json::json;
    use std::cell::RefCell;

    fn ctx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    fn filled() -> FormState<MaintenanceForm> {
        let mut form = FormState::<MaintenanceForm>::default();
        form.open_create();
        for (field, value) in [
            (fields::VEHICLE, "1"),
            (fields::KIND, "2"),
            (fields::DATE, "2024-06-15"),
            (fields::ODOMETER, "32000"),
            (fields::COST, "45990"),
            (fields::SUPPLIER, "3"),
        ] {
            form.set_field(field, value);
        }
        form
    }

    fn record(id: i64, cost: f64) -> serde_json::Value {
        json!({"id": id, "vehiculo_id": 1, "tipo_id": 2, "descripcion": "Cambio de aceite",
               "fecha": "2024-06-15", "kilometraje": 32000, "costo": cost, "proveedor_id": 3})
    }

    #[test]
    fn test_future_date_never_reaches_the_network() {
        let mut form = filled();
        form.set_field(fields::DATE, "2024-06-16");
        assert!(form.prepare_submit(&ctx(), &[]).is_none());
        assert_eq!(form.error(fields::DATE).as_deref(), Some("La fecha no puede ser futura"));
    }

    #[test]
    fn test_create_is_confirmed_too() {
        let mut form = filled();
        let request = form.prepare_submit(&ctx(), &[]).unwrap();
        assert_eq!(request.confirmation.as_deref(), Some(CREATE_CONFIRMATION));
    }

    #[tokio::test]
    async fn test_declined_confirmation_sends_nothing() {
        let fake = FakeTransport::new();
        let api = RestClient::new(fake.clone(), "http://api");
        let mut form = filled();
        let asked = RefCell::new(Vec::new());

        let request = form.prepare_submit(&ctx(), &[]).unwrap();
        let outcome = execute(&api, request, &NoEnrichment, &ctx(), &|q: &str| {
            asked.borrow_mut().push(q.to_string());
            false
        })
        .await;

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert_eq!(asked.into_inner(), vec![CREATE_CONFIRMATION.to_string()]);
        assert!(fake.requests().is_empty());
        assert!(form.visible);
    }

    #[tokio::test]
    async fn test_create_then_edit_reconciles_list() {
        let fake = FakeTransport::new();
        fake.push_json(201, record(10, 45990.0));
        fake.push_json(200, record(10, 50000.0));
        let api = RestClient::new(fake.clone(), "http://api");

        let mut list = ListState::<Maintenance>::new(fields::DATE);
        list.replace_all(Vec::new());

        let mut form = filled();
        let request = form.prepare_submit(&ctx(), &list.items).unwrap();
        let outcome = execute(&api, request, &NoEnrichment, &ctx(), &|_| true).await;
        let (edited, saved) = form.complete_submit(outcome).unwrap();
        list.apply_mutation(edited, saved.clone());
        assert_eq!(list.items.len(), 1);
        assert!(!form.visible);

        form.open_edit(&saved);
        form.set_field(fields::COST, "50000");
        let request = form.prepare_submit(&ctx(), &list.items).unwrap();
        assert_eq!(request.confirmation.as_deref(), Some(EDIT_CONFIRMATION));
        let outcome = execute(&api, request, &NoEnrichment, &ctx(), &|_| true).await;
        let (edited, saved) = form.complete_submit(outcome).unwrap();
        list.apply_mutation(edited, saved);

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].id, Some(MaintenanceId(10)));
        assert_eq!(list.items[0].cost, 50000.0);

        let requests = fake.requests();
        assert_eq!(requests[1].method, Method::Put);
        assert_eq!(requests[1].url, "http://api/mantenciones/10");
        assert_eq!(requests[1].body.as_ref().unwrap()["costo"], 50000.0);
    }

    #[tokio::test]
    async fn test_failed_save_uses_generic_message() {
        let fake = FakeTransport::new();
        fake.push_json(500, json!({}));
        let api = RestClient::new(fake, "http://api");

        let mut form = filled();
        let request = form.prepare_submit(&ctx(), &[]).unwrap();
        let outcome = execute(&api, request, &NoEnrichment, &ctx(), &|_| true).await;
        form.complete_submit(outcome);
        assert_eq!(form.global_error.as_deref(), Some("Error al guardar mantención"));
    }
}
