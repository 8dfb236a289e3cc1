pub mod state;

use self::state::{create_state, display_date, fetch_artifact, fetch_rows, ReportStatus};
use crate::shared::artifact::BlobUrls;
use crate::shared::components::table::TableCellMoney;
use crate::shared::components::ui::{Input, Select};
use crate::shared::components::PageHeader;
use crate::shared::export::{download_bytes, download_url};
use crate::shared::icons::icon;
use crate::shared::reference::load_all;
use crate::shared::services::use_services;
use contracts::domain::a002_supplier::aggregate::Supplier;
use contracts::projections::p900_maintenance_report::dto::{MaintenanceKind, ReportOutput};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn MaintenanceReport() -> impl IntoView {
    let services = StoredValue::new(use_services());
    let state = create_state();
    let suppliers = RwSignal::new(Vec::<Supplier>::new());

    let api = services.with_value(|s| s.api.clone());
    spawn_local(async move {
        let loaded: Vec<Supplier> = load_all(&api).await;
        suppliers.set(loaded);
    });

    on_cleanup(move || {
        state.try_update(|s| s.chart.release(&BlobUrls));
    });

    let search = move || {
        let mut filters = None;
        state.update(|s| filters = s.begin_search(&BlobUrls));
        let Some(filters) = filters else {
            return;
        };
        let api = services.with_value(|s| s.api.clone());
        spawn_local(async move {
            let result = fetch_rows(&api, &filters).await;
            if let Err(e) = &result {
                log::error!("{}", e);
            }
            state.update(|s| s.finish_search(result));
        });
    };

    let export_spreadsheet = move || {
        let filters = state.with_untracked(|s| s.inputs.filters());
        let api = services.with_value(|s| s.api.clone());
        state.update(|s| s.action_error = None);
        spawn_local(async move {
            let output = ReportOutput::Spreadsheet;
            let result = fetch_artifact(&api, &filters, output)
                .await
                .and_then(|bytes| download_bytes(&bytes, output.mime_type(), output.file_name()));
            if let Err(e) = result {
                log::error!("{}", e);
                state.update(|s| s.action_error = Some(e));
            }
        });
    };

    let render_chart = move || {
        let filters = state.with_untracked(|s| s.inputs.filters());
        let api = services.with_value(|s| s.api.clone());
        state.update(|s| s.action_error = None);
        spawn_local(async move {
            let result = fetch_artifact(&api, &filters, ReportOutput::Chart).await;
            state.update(|s| s.show_chart(&BlobUrls, result));
        });
    };

    let download_chart = move || {
        let Some(url) = state.with_untracked(|s| s.chart.url().map(str::to_string)) else {
            return;
        };
        if let Err(e) = download_url(&url, ReportOutput::Chart.file_name()) {
            log::error!("Error al descargar gráfico: {}", e);
        }
    };

    let input = move |apply: fn(&mut state::ReportInputs, String)| {
        Callback::new(move |raw: String| state.update(|s| apply(&mut s.inputs, raw)))
    };
    let can_export = Signal::derive(move || state.with(|s| s.can_export()));

    let kind_options: Vec<(String, String)> = MaintenanceKind::ALL
        .iter()
        .map(|k| (k.as_str().to_string(), k.label().to_string()))
        .collect();
    let supplier_options = Signal::derive(move || {
        suppliers.with(|all| all.iter().map(|s| (s.name.clone(), s.name.clone())).collect())
    });

    view! {
        <div class="page">
            <PageHeader title="Reportes de Mantenciones" icon="report" />

            <div class="filter-panel">
                <Input
                    label="Fecha desde"
                    input_type="date"
                    value=Signal::derive(move || state.with(|s| s.inputs.date_from.clone()))
                    on_input=input(|i, v| i.date_from = v)
                />
                <Input
                    label="Fecha hasta"
                    input_type="date"
                    value=Signal::derive(move || state.with(|s| s.inputs.date_to.clone()))
                    on_input=input(|i, v| i.date_to = v)
                />
                <Input
                    label="Patente"
                    placeholder="AB1234"
                    value=Signal::derive(move || state.with(|s| s.inputs.plate.clone()))
                    on_input=Callback::new(move |raw: String| state.update(|s| s.set_plate(&raw)))
                />
                <Select
                    label="Tipo de mantención"
                    placeholder="Todos"
                    value=Signal::derive(move || state.with(|s| s.inputs.kind.clone()))
                    on_change=input(|i, v| i.kind = v)
                    options=kind_options
                />
                <Select
                    label="Proveedor"
                    placeholder="Todos"
                    value=Signal::derive(move || state.with(|s| s.inputs.supplier.clone()))
                    on_change=input(|i, v| i.supplier = v)
                    options=supplier_options
                />
            </div>

            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || state.with(|s| s.is_loading()))
                    on_click=move |_| search()
                >
                    {move || if state.with(|s| s.is_loading()) { "Buscando..." } else { "Buscar" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| state.update(|s| s.clear(&BlobUrls))
                >
                    "Limpiar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || !can_export.get())
                    on_click=move |_| export_spreadsheet()
                >
                    {icon("download")}
                    " Descargar Excel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || !can_export.get())
                    on_click=move |_| render_chart()
                >
                    {icon("report")}
                    " Ver gráfico"
                </Button>
            </Flex>

            {move || state.with(|s| s.info.clone()).map(|message| view! {
                <MessageBar intent=MessageBarIntent::Info>{message}</MessageBar>
            })}
            {move || {
                let search_error = state.with(|s| match &s.status {
                    ReportStatus::Error(message) => Some(message.clone()),
                    _ => None,
                });
                search_error
                    .or_else(|| state.with(|s| s.action_error.clone()))
                    .map(|message| view! {
                        <MessageBar intent=MessageBarIntent::Error>{message}</MessageBar>
                    })
            }}

            <Show when=move || state.with(|s| s.is_loading())>
                <Spinner label="Cargando reporte..." />
            </Show>

            <Show when=move || state.with(|s| !s.rows.is_empty())>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=60.0>"ID"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Patente"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Tipo"</TableHeaderCell>
                            <TableHeaderCell min_width=180.0>"Proveedor"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Fecha"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Costo"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || state.with(|s| s.rows.clone()).into_iter().map(|row| {
                            let cost = row.cost;
                            view! {
                                <TableRow>
                                    <TableCell>{row.id}</TableCell>
                                    <TableCell>{row.vehicle_plate}</TableCell>
                                    <TableCell>{row.maintenance_type}</TableCell>
                                    <TableCell><TableCellLayout truncate=true>{row.supplier}</TableCellLayout></TableCell>
                                    <TableCell>{display_date(row.date.as_deref())}</TableCell>
                                    <TableCellMoney value=Signal::derive(move || cost) />
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
            </Show>
            <Show when=move || state.with(|s| s.status == ReportStatus::Loaded && s.rows.is_empty())>
                <p class="text-muted">"No se encontraron mantenciones para los filtros ingresados."</p>
            </Show>

            {move || state.with(|s| s.chart.url().map(str::to_string)).map(|url| view! {
                <div class="report-chart">
                    <img src=url alt="Gráfico de mantenciones" class="report-chart__image" />
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| download_chart()>
                        {icon("download")}
                        " Descargar gráfico"
                    </Button>
                </div>
            })}
        </div>
    }
}
