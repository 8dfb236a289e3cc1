use super::view_model::SupplierDetailsVm;
use crate::shared::components::ui::{Checkbox, Input, Select};
use crate::shared::services::use_services;
use contracts::domain::a002_supplier::aggregate::{fields, PHONE_PREFIX};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn SupplierDetails(vm: SupplierDetailsVm) -> impl IntoView {
    let services = StoredValue::new(use_services());
    let form = vm.form;
    let is_editing = form.is_editing();
    let use_new_address = form.checked(fields::USE_NEW_ADDRESS);

    view! {
        <div class="details-panel">
            <h2 class="details-panel__title">
                {move || if is_editing.get() { "Editar proveedor" } else { "Nuevo proveedor" }}
            </h2>

            <div class="details-panel__grid">
                <Input
                    label="Nombre"
                    value=form.value(fields::NAME)
                    on_input=form.on_input(fields::NAME)
                    error=form.error(fields::NAME)
                />
                <Input
                    label="Teléfono"
                    prefix=PHONE_PREFIX
                    placeholder="912345678"
                    value=form.value(fields::PHONE)
                    on_input=form.on_input(fields::PHONE)
                    error=form.error(fields::PHONE)
                />
                <Input
                    label="Email"
                    input_type="email"
                    value=form.value(fields::EMAIL)
                    on_input=form.on_input(fields::EMAIL)
                    error=form.error(fields::EMAIL)
                />
            </div>

            <Show when=move || !use_new_address.get()>
                <Select
                    label="Dirección"
                    value=form.value(fields::ADDRESS_ID)
                    on_change=form.on_input(fields::ADDRESS_ID)
                    options=vm.address_options()
                    error=form.error(fields::ADDRESS_ID)
                />
            </Show>

            <Checkbox
                label="Crear nueva dirección"
                checked=use_new_address
                on_change=Callback::new(move |on: bool| vm.set_new_address(on))
            />

            <Show when=move || use_new_address.get()>
                <div class="details-panel__section">
                    <h4>"Datos nueva dirección"</h4>
                    <Input
                        label="Calle"
                        value=form.value(fields::NEW_STREET)
                        on_input=form.on_input(fields::NEW_STREET)
                        error=form.error(fields::NEW_STREET)
                    />
                    <Select
                        label="Región"
                        value=form.value(fields::NEW_REGION)
                        on_change=Callback::new(move |region: String| {
                            services.with_value(|s| vm.set_region(s, region))
                        })
                        options=vm.region_options()
                        error=form.error(fields::NEW_REGION)
                    />
                    <Select
                        label="Comuna"
                        value=form.value(fields::NEW_COMMUNE)
                        on_change=form.on_input(fields::NEW_COMMUNE)
                        options=vm.commune_options()
                        disabled=Signal::derive(move || vm.communes.with(Vec::is_empty))
                        error=form.error(fields::NEW_COMMUNE)
                    />
                </div>
            </Show>

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
                    {move || if is_editing.get() { "Actualizar" } else { "Guardar" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| form.cancel()>
                    "Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
