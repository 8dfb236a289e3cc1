use super::view_model::MaintenanceDetailsVm;
use crate::shared::components::ui::{Input, Select, Textarea};
use crate::shared::services::use_services;
use contracts::domain::a004_maintenance::aggregate::{fields, DESCRIPTION_MAX_LEN};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn MaintenanceDetails(vm: MaintenanceDetailsVm) -> impl IntoView {
    let services = StoredValue::new(use_services());
    let form = vm.form;
    let is_editing = form.is_editing();
    let description = form.value(fields::DESCRIPTION);

    view! {
        <div class="details-panel">
            <h2 class="details-panel__title">
                {move || if is_editing.get() { "Editar mantención" } else { "Registrar mantención" }}
            </h2>

            <div class="details-panel__grid">
                <Select
                    label="Vehículo"
                    value=form.value(fields::VEHICLE)
                    on_change=form.on_input(fields::VEHICLE)
                    options=vm.vehicle_options()
                    error=form.error(fields::VEHICLE)
                />
                <Select
                    label="Tipo de mantención"
                    value=form.value(fields::KIND)
                    on_change=form.on_input(fields::KIND)
                    options=vm.type_options()
                    error=form.error(fields::KIND)
                />
                <Select
                    label="Proveedor"
                    value=form.value(fields::SUPPLIER)
                    on_change=form.on_input(fields::SUPPLIER)
                    options=vm.supplier_options()
                    error=form.error(fields::SUPPLIER)
                />
                <Input
                    label="Fecha"
                    input_type="date"
                    value=form.value(fields::DATE)
                    on_input=form.on_input(fields::DATE)
                    error=form.error(fields::DATE)
                />
                <Input
                    label="Kilometraje"
                    input_type="number"
                    value=form.value(fields::ODOMETER)
                    on_input=form.on_input(fields::ODOMETER)
                    error=form.error(fields::ODOMETER)
                />
                <Input
                    label="Costo"
                    input_type="number"
                    prefix="$"
                    value=form.value(fields::COST)
                    on_input=form.on_input(fields::COST)
                    error=form.error(fields::COST)
                />
            </div>

            <Textarea
                label="Descripción"
                rows=3
                value=description
                on_input=form.on_input(fields::DESCRIPTION)
                error=form.error(fields::DESCRIPTION)
            />
            <span class="text-muted">
                {move || format!("{}/{}", description.with(|d| d.chars().count()), DESCRIPTION_MAX_LEN)}
            </span>

            {move || form.global_error().get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::from(form.saving)
                    on_click=move |_| services.with_value(|s| vm.save(s))
                >
                    {move || if is_editing.get() { "Actualizar" } else { "Registrar" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| form.cancel()>
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
