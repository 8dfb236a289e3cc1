use super::state::{create_state, keep_order, visible_rows};
use crate::shared::components::{Notices, PageHeader};
use crate::shared::list_state::spawn_reload;
use crate::shared::list_utils::SearchInput;
use crate::shared::reference::{load_all, load_maintenance_types};
use crate::shared::services::use_services;
use contracts::domain::a001_vehicle::aggregate::Vehicle;
use contracts::domain::a004_maintenance::aggregate::MaintenanceType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Read-only plan of upcoming maintenance
#[component]
#[allow(non_snake_case)]
pub fn ScheduledMaintenanceList() -> impl IntoView {
    let services = use_services();
    let state = create_state();
    let vehicles = RwSignal::new(Vec::<Vehicle>::new());
    let types = RwSignal::new(Vec::<MaintenanceType>::new());

    let rows = Memo::new(move |_| {
        state.with(|s| vehicles.with(|v| types.with(|t| visible_rows(s, v, t))))
    });

    spawn_reload(services.api.clone(), state, keep_order);
    let api = services.api.clone();
    spawn_local(async move {
        vehicles.set(load_all(&api).await);
        types.set(load_maintenance_types(&api).await);
    });

    view! {
        <div class="page">
            <PageHeader
                title="Programación de Mantenciones"
                icon="calendar"
                count=Signal::derive(move || state.with(|s| s.items.len()))
            />

            <Notices
                notice=Signal::derive(move || state.with(|s| s.notice.clone()))
                error=Signal::derive(move || state.with(|s| s.error.clone()))
            />

            <SearchInput
                value=Signal::derive(move || state.with(|s| s.filter.clone()))
                on_change=Callback::new(move |text: String| state.update(|s| s.filter = text))
                placeholder="Buscar por patente o descripción"
            />

            <Show
                when=move || state.with(|s| s.is_loaded)
                fallback=|| view! { <Spinner label="Cargando programación..." /> }
            >
                <Show
                    when=move || !state.with(|s| s.items.is_empty())
                    fallback=|| view! { <p class="text-muted">"No hay mantenciones programadas."</p> }
                >
                    <ul class="schedule-list">
                        {move || rows.get().into_iter().map(|row| {
                            let plan = row.frequency();
                            view! {
                                <li class="schedule-list__item">
                                    <span>{row.summary()}</span>
                                    {plan.map(|text| view! { <span class="text-muted">{text}</span> })}
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </Show>
            </Show>
        </div>
    }
}
