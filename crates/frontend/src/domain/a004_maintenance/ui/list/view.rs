use super::state::{create_state, keep_order, visible_rows};
use crate::domain::a004_maintenance::ui::details::{MaintenanceDetails, MaintenanceDetailsVm};
use crate::shared::components::table::{SortableHeaderCell, TableCellMoney};
use crate::shared::components::{Notices, PageHeader};
use crate::shared::date_utils::format_thousands;
use crate::shared::icons::icon;
use crate::shared::list_state::spawn_reload;
use crate::shared::list_utils::SearchInput;
use crate::shared::services::use_services;
use contracts::domain::a004_maintenance::aggregate::fields;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn MaintenanceList() -> impl IntoView {
    let services = StoredValue::new(use_services());
    let state = create_state();
    let vm = MaintenanceDetailsVm::new(state);

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));
    let on_sort = Callback::new(move |field: String| state.update(|s| s.toggle_sort(&field)));

    let rows = Memo::new(move |_| {
        state.with(|s| {
            vm.vehicles.with(|vehicles| {
                vm.types.with(|types| {
                    vm.suppliers.with(|suppliers| visible_rows(s, vehicles, types, suppliers))
                })
            })
        })
    });

    services.with_value(|s| {
        spawn_reload(s.api.clone(), state, keep_order);
        vm.load_reference(s);
    });

    view! {
        <div class="page">
            <PageHeader
                title="Mantenciones"
                icon="maintenance"
                count=Signal::derive(move || state.with(|s| s.items.len()))
            >
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.create()>
                    {icon("plus")}
                    " Registrar mantención"
                </Button>
            </PageHeader>

            <Notices
                notice=Signal::derive(move || state.with(|s| s.notice.clone()))
                error=Signal::derive(move || state.with(|s| s.error.clone()))
            />

            <Show when=move || vm.form.is_visible().get()>
                <MaintenanceDetails vm=vm />
            </Show>

            <SearchInput
                value=Signal::derive(move || state.with(|s| s.filter.clone()))
                on_change=Callback::new(move |text: String| state.update(|s| s.filter = text))
                placeholder="Buscar por patente, tipo o proveedor"
            />

            <Show
                when=move || state.with(|s| s.is_loaded)
                fallback=|| view! { <Spinner label="Cargando mantenciones..." /> }
            >
                <Table>
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Vehículo" sort_field=fields::VEHICLE
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Tipo" sort_field=fields::KIND
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Descripción" sort_field=fields::DESCRIPTION min_width=220.0
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Fecha" sort_field=fields::DATE
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Kilometraje" sort_field=fields::ODOMETER
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Costo" sort_field=fields::COST
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Proveedor" sort_field=fields::SUPPLIER min_width=160.0
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <TableHeaderCell min_width=80.0>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || rows.get().into_iter().map(|row| {
                            let record = row.record.clone();
                            let editable = record.id.is_some();
                            let cost = row.record.cost;
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{row.plate}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{row.kind}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{row.description}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{row.date}</TableCellLayout></TableCell>
                                    <TableCell class="text-right">{format_thousands(row.record.odometer)}</TableCell>
                                    <TableCellMoney value=Signal::derive(move || Some(cost)) />
                                    <TableCell><TableCellLayout truncate=true>{row.supplier}</TableCellLayout></TableCell>
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            disabled=!editable
                                            on_click=move |_| vm.edit(&record)
                                        >
                                            {icon("edit")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || rows.with(Vec::is_empty)>
                    <p class="text-muted">"No hay mantenciones registradas."</p>
                </Show>
            </Show>
        </div>
    }
}
