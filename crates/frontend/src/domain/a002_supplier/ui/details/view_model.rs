use super::model::SupplierForm;
use crate::shared::form::{FormController, NoEnrichment};
use crate::shared::list_state::ListState;
use crate::shared::reference::{load_all, load_communes, load_regions};
use crate::shared::services::Services;
use contracts::domain::a002_supplier::aggregate::{fields, Supplier};
use contracts::domain::a003_address::aggregate::Address;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Supplier form plus the selectors it depends on
#[derive(Clone, Copy)]
pub struct SupplierDetailsVm {
    pub form: FormController<SupplierForm>,
    pub list: RwSignal<ListState<Supplier>>,
    pub addresses: RwSignal<Vec<Address>>,
    pub regions: RwSignal<Vec<String>>,
    pub communes: RwSignal<Vec<String>>,
}

impl SupplierDetailsVm {
    pub fn new(list: RwSignal<ListState<Supplier>>) -> Self {
        Self {
            form: FormController::new(),
            list,
            addresses: RwSignal::new(Vec::new()),
            regions: RwSignal::new(Vec::new()),
            communes: RwSignal::new(Vec::new()),
        }
    }

    /// Addresses and regions, loaded once per screen
    pub fn load_reference(self, services: &Services) {
        let api = services.api.clone();
        let geo = services.geo.clone();
        spawn_local(async move {
            let addresses: Vec<Address> = load_all(&api).await;
            self.addresses.set(addresses);
            let regions = load_regions(&geo).await;
            self.regions.set(regions);
        });
    }

    pub fn create(self) {
        self.list.update(|l| l.notice = None);
        self.communes.set(Vec::new());
        self.form.open_create();
    }

    /// Open the form with the supplier's data and the communes of its region
    pub fn edit(self, services: &Services, supplier: &Supplier) {
        self.list.update(|l| l.notice = None);
        self.form.open_edit(supplier);
        let region = supplier
            .address
            .as_ref()
            .map(|a| a.region.clone())
            .unwrap_or_default();
        self.refresh_communes(services, region);
    }

    pub fn set_region(self, services: &Services, region: String) {
        self.form.set(fields::NEW_REGION, &region);
        self.refresh_communes(services, region);
    }

    pub fn set_new_address(self, on: bool) {
        self.form.set(fields::USE_NEW_ADDRESS, if on { "true" } else { "false" });
        if !on {
            self.communes.set(Vec::new());
        }
    }

    fn refresh_communes(self, services: &Services, region: String) {
        let geo = services.geo.clone();
        spawn_local(async move {
            let communes = load_communes(&geo, &region).await;
            self.communes.set(communes);
        });
    }

    pub fn save(self, services: &Services) {
        self.form.submit(services.api.clone(), NoEnrichment, self.list);
    }

    pub fn address_options(self) -> Signal<Vec<(String, String)>> {
        let addresses = self.addresses;
        Signal::derive(move || {
            addresses.with(|all| {
                all.iter()
                    .map(|a| (a.id.as_string(), a.label()))
                    .collect()
            })
        })
    }

    pub fn region_options(self) -> Signal<Vec<(String, String)>> {
        names_as_options(self.regions)
    }

    pub fn commune_options(self) -> Signal<Vec<(String, String)>> {
        names_as_options(self.communes)
    }
}

fn names_as_options(names: RwSignal<Vec<String>>) -> Signal<Vec<(String, String)>> {
    Signal::derive(move || {
        names.with(|all| all.iter().map(|n| (n.clone(), n.clone())).collect())
    })
}
