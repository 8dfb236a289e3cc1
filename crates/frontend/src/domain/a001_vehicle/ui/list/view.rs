use super::state::{create_state, sort_by_plate};
use crate::domain::a001_vehicle::ui::details::model::VEHICLE_DELETE_MESSAGES;
use crate::domain::a001_vehicle::ui::details::{VehicleDetails, VehicleDetailsVm};
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::{Notices, PageHeader};
use crate::shared::date_utils::format_thousands;
use crate::shared::icons::icon;
use crate::shared::list_state::{spawn_reload, spawn_remove};
use crate::shared::list_utils::SearchInput;
use crate::shared::services::use_services;
use contracts::domain::a001_vehicle::aggregate::{fields, Vehicle};
use leptos::prelude::*;
use thaw::*;

fn format_odometer(km: f64) -> String {
    format!("{} km", format_thousands(km))
}

#[component]
#[allow(non_snake_case)]
pub fn VehicleList() -> impl IntoView {
    let services = StoredValue::new(use_services());
    let state = create_state();
    let vm = VehicleDetailsVm::new(state);

    let fetch = move || spawn_reload(services.with_value(|s| s.api.clone()), state, sort_by_plate);

    let delete = move |vehicle: Vehicle| {
        spawn_remove(
            services.with_value(|s| s.api.clone()),
            state,
            vehicle.id,
            &VEHICLE_DELETE_MESSAGES,
            sort_by_plate,
        );
    };

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));
    let on_sort = Callback::new(move |field: String| state.update(|s| s.toggle_sort(&field)));

    fetch();

    view! {
        <div class="page">
            <PageHeader
                title="Vehículos"
                icon="vehicles"
                count=Signal::derive(move || state.with(|s| s.items.len()))
            >
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.create()>
                    {icon("plus")}
                    " Nuevo vehículo"
                </Button>
            </PageHeader>

            <Notices
                notice=Signal::derive(move || state.with(|s| s.notice.clone()))
                error=Signal::derive(move || state.with(|s| s.error.clone()))
            />

            <Show when=move || vm.form.is_visible().get()>
                <VehicleDetails vm=vm />
            </Show>

            <SearchInput
                value=Signal::derive(move || state.with(|s| s.filter.clone()))
                on_change=Callback::new(move |text: String| state.update(|s| s.filter = text))
                placeholder="Buscar por patente, marca o modelo"
            />

            <Show
                when=move || state.with(|s| s.is_loaded)
                fallback=|| view! { <Spinner label="Cargando vehículos..." /> }
            >
                <Table>
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Patente" sort_field=fields::PLATE
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Marca" sort_field=fields::BRAND
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Modelo" sort_field=fields::MODEL
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Año" sort_field=fields::YEAR min_width=80.0
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Kilometraje" sort_field=fields::ODOMETER
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <TableHeaderCell min_width=120.0>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || state.with(|s| s.visible()).into_iter().map(|vehicle| {
                            let for_edit = vehicle.clone();
                            let for_delete = vehicle.clone();
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>
                                            <strong>{vehicle.plate}</strong>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell><TableCellLayout truncate=true>{vehicle.brand}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{vehicle.model}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{vehicle.year}</TableCellLayout></TableCell>
                                    <TableCell class="text-right">{format_odometer(vehicle.odometer)}</TableCell>
                                    <TableCell>
                                        <Flex gap=FlexGap::Small>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| vm.edit(&for_edit)
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| delete(for_delete.clone())
                                            >
                                                {icon("delete")}
                                            </Button>
                                        </Flex>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || state.with(|s| s.visible().is_empty())>
                    <p class="text-muted">"No hay vehículos registrados."</p>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_odometer_uses_thousand_dots() {
        assert_eq!(format_odometer(42000.0), "42.000 km");
        assert_eq!(format_odometer(0.0), "0 km");
    }
}
