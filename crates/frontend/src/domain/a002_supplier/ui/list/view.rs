use super::state::{create_state, sort_by_name, ADDRESS_COLUMN};
use crate::domain::a002_supplier::ui::details::model::SUPPLIER_DELETE_MESSAGES;
use crate::domain::a002_supplier::ui::details::{SupplierDetails, SupplierDetailsVm};
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::{Notices, PageHeader};
use crate::shared::icons::icon;
use crate::shared::list_state::{spawn_reload, spawn_remove};
use crate::shared::list_utils::SearchInput;
use crate::shared::services::use_services;
use contracts::domain::a002_supplier::aggregate::{fields, Supplier};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn SupplierList() -> impl IntoView {
    let services = StoredValue::new(use_services());
    let state = create_state();
    let vm = SupplierDetailsVm::new(state);

    let delete = move |supplier: Supplier| {
        spawn_remove(
            services.with_value(|s| s.api.clone()),
            state,
            supplier.id,
            &SUPPLIER_DELETE_MESSAGES,
            sort_by_name,
        );
    };

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));
    let on_sort = Callback::new(move |field: String| state.update(|s| s.toggle_sort(&field)));

    services.with_value(|s| {
        spawn_reload(s.api.clone(), state, sort_by_name);
        vm.load_reference(s);
    });

    view! {
        <div class="page">
            <PageHeader
                title="Proveedores"
                icon="suppliers"
                count=Signal::derive(move || state.with(|s| s.items.len()))
            >
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.create()>
                    {icon("plus")}
                    " Nuevo proveedor"
                </Button>
            </PageHeader>

            <Notices
                notice=Signal::derive(move || state.with(|s| s.notice.clone()))
                error=Signal::derive(move || state.with(|s| s.error.clone()))
            />

            <Show when=move || vm.form.is_visible().get()>
                <SupplierDetails vm=vm />
            </Show>

            <SearchInput
                value=Signal::derive(move || state.with(|s| s.filter.clone()))
                on_change=Callback::new(move |text: String| state.update(|s| s.filter = text))
                placeholder="Buscar por nombre, email o teléfono"
            />

            <Show
                when=move || state.with(|s| s.is_loaded)
                fallback=|| view! { <Spinner label="Cargando proveedores..." /> }
            >
                <Table>
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Nombre" sort_field=fields::NAME min_width=180.0
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Teléfono" sort_field=fields::PHONE min_width=130.0
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Email" sort_field=fields::EMAIL min_width=180.0
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="Dirección" sort_field=ADDRESS_COLUMN min_width=240.0
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <TableHeaderCell min_width=120.0>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || state.with(|s| s.visible()).into_iter().map(|supplier| {
                            let for_edit = supplier.clone();
                            let for_delete = supplier.clone();
                            let address = supplier.address_label().unwrap_or_else(|| "-".to_string());
                            view! {
                                <TableRow>
                                    <TableCell><TableCellLayout truncate=true>{supplier.name}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout>{supplier.phone}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{supplier.email}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{address}</TableCellLayout></TableCell>
                                    <TableCell>
                                        <Flex gap=FlexGap::Small>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| services.with_value(|s| vm.edit(s, &for_edit))
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
            </Show>
        </div>
    }
}
