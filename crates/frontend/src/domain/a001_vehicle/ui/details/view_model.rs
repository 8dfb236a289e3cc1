use super::model::{PlateEnrichment, VehicleForm};
use crate::shared::form::FormController;
use crate::shared::list_state::ListState;
use crate::shared::services::Services;
use contracts::domain::a001_vehicle::aggregate::Vehicle;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct VehicleDetailsVm {
    pub form: FormController<VehicleForm>,
    pub list: RwSignal<ListState<Vehicle>>,
}

impl VehicleDetailsVm {
    pub fn new(list: RwSignal<ListState<Vehicle>>) -> Self {
        Self {
            form: FormController::new(),
            list,
        }
    }

    pub fn create(self) {
        self.list.update(|l| l.notice = None);
        self.form.open_create();
    }

    pub fn edit(self, vehicle: &Vehicle) {
        self.list.update(|l| l.notice = None);
        self.form.open_edit(vehicle);
    }

    /// The plate is checked against the registry on every save
    pub fn save(self, services: &Services) {
        let enrich = PlateEnrichment {
            lookup: services.plates.clone(),
        };
        self.form.submit(services.api.clone(), enrich, self.list);
    }
}
