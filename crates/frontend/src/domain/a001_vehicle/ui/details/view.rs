use super::view_model::VehicleDetailsVm;
use crate::shared::components::ui::Input;
use crate::shared::services::use_services;
use contracts::domain::a001_vehicle::aggregate::fields;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn VehicleDetails(vm: VehicleDetailsVm) -> impl IntoView {
    let services = use_services();
    let form = vm.form;
    let is_editing = form.is_editing();

    view! {
        <div class="details-panel">
            <h2 class="details-panel__title">
                {move || if is_editing.get() { "Editar vehículo" } else { "Nuevo vehículo" }}
            </h2>
            <Show when=move || is_editing.get()>
                <p class="text-muted">"Solo el kilometraje puede modificarse."</p>
            </Show>

            <div class="details-panel__grid">
                <Input
                    label="Patente"
                    placeholder="AB1234"
                    value=form.value(fields::PLATE)
                    on_input=form.on_input(fields::PLATE)
                    disabled=form.is_locked(fields::PLATE)
                    error=form.error(fields::PLATE)
                />
                <Input
                    label="Marca"
                    value=form.value(fields::BRAND)
                    on_input=form.on_input(fields::BRAND)
                    disabled=form.is_locked(fields::BRAND)
                    error=form.error(fields::BRAND)
                />
                <Input
                    label="Modelo"
                    value=form.value(fields::MODEL)
                    on_input=form.on_input(fields::MODEL)
                    disabled=form.is_locked(fields::MODEL)
                    error=form.error(fields::MODEL)
                />
                <Input
                    label="Año"
                    input_type="number"
                    value=form.value(fields::YEAR)
                    on_input=form.on_input(fields::YEAR)
                    disabled=form.is_locked(fields::YEAR)
                    error=form.error(fields::YEAR)
                />
                <Input
                    label="Kilometraje"
                    input_type="number"
                    value=form.value(fields::ODOMETER)
                    on_input=form.on_input(fields::ODOMETER)
                    error=form.error(fields::ODOMETER)
                />
            </div>

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
                    on_click=move |_| vm.save(&services)
                >
                    {move || if form.saving.get() { "Verificando patente..." } else { "Guardar" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| form.cancel()
                >
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
