use super::model::MaintenanceForm;
use crate::shared::form::{FormController, NoEnrichment};
use crate::shared::list_state::ListState;
use crate::shared::reference::{load_all, load_maintenance_types};
use crate::shared::services::Services;
use contracts::domain::a001_vehicle::aggregate::Vehicle;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::domain::a004_maintenance::aggregate::{Maintenance, MaintenanceType};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Maintenance form plus the three collections its selectors need
#[derive(Clone, Copy)]
pub struct MaintenanceDetailsVm {
    pub form: FormController<MaintenanceForm>,
    pub list: RwSignal<ListState<Maintenance>>,
    pub vehicles: RwSignal<Vec<Vehicle>>,
    pub types: RwSignal<Vec<MaintenanceType>>,
    pub suppliers: RwSignal<Vec<Supplier>>,
}

impl MaintenanceDetailsVm {
    pub fn new(list: RwSignal<ListState<Maintenance>>) -> Self {
        Self {
            form: FormController::new(),
            list,
            vehicles: RwSignal::new(Vec::new()),
            types: RwSignal::new(Vec::new()),
            suppliers: RwSignal::new(Vec::new()),
        }
    }

    pub fn load_reference(self, services: &Services) {
        let api = services.api.clone();
        spawn_local(async move {
            let vehicles: Vec<Vehicle> = load_all(&api).await;
            self.vehicles.set(vehicles);
            let types = load_maintenance_types(&api).await;
            self.types.set(types);
            let suppliers: Vec<Supplier> = load_all(&api).await;
            self.suppliers.set(suppliers);
        });
    }

    pub fn create(self) {
        self.list.update(|l| l.notice = None);
        self.form.open_create();
    }

    pub fn edit(self, record: &Maintenance) {
        self.list.update(|l| l.notice = None);
        self.form.open_edit(record);
    }

    pub fn save(self, services: &Services) {
        self.form.submit(services.api.clone(), NoEnrichment, self.list);
    }

    pub fn vehicle_options(self) -> Signal<Vec<(String, String)>> {
        let vehicles = self.vehicles;
        Signal::derive(move || {
            vehicles.with(|all| all.iter().map(|v| (v.id.as_string(), v.plate.clone())).collect())
        })
    }

    pub fn type_options(self) -> Signal<Vec<(String, String)>> {
        let types = self.types;
        Signal::derive(move || {
            types.with(|all| all.iter().map(|t| (t.id.as_string(), t.name.clone())).collect())
        })
    }

    pub fn supplier_options(self) -> Signal<Vec<(String, String)>> {
        let suppliers = self.suppliers;
        Signal::derive(move || {
            suppliers.with(|all| all.iter().map(|s| (s.id.as_string(), s.name.clone())).collect())
        })
    }
}
