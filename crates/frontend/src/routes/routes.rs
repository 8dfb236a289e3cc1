use crate::domain::a001_vehicle::ui::list::VehicleList;
use crate::domain::a002_supplier::ui::list::SupplierList;
use crate::domain::a004_maintenance::ui::list::MaintenanceList;
use crate::domain::a005_scheduled_maintenance::ui::list::ScheduledMaintenanceList;
use crate::projections::p900_maintenance_report::ui::list::MaintenanceReport;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Top-level screens. Only one is mounted at a time, so each screen's
/// state lives exactly as long as the screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Vehicles,
    Suppliers,
    Maintenance,
    Scheduling,
    Reports,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Vehicles,
        Screen::Suppliers,
        Screen::Maintenance,
        Screen::Scheduling,
        Screen::Reports,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Vehicles => "vehiculos",
            Self::Suppliers => "proveedores",
            Self::Maintenance => "mantenciones",
            Self::Scheduling => "programacion",
            Self::Reports => "reportes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vehicles => "Vehículos",
            Self::Suppliers => "Proveedores",
            Self::Maintenance => "Mantenciones",
            Self::Scheduling => "Programación",
            Self::Reports => "Reportes",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Suppliers => "suppliers",
            Self::Maintenance => "maintenance",
            Self::Scheduling => "calendar",
            Self::Reports => "report",
        }
    }

    /// Unknown keys fall back to the vehicles screen
    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.key() == key)
            .unwrap_or(Screen::Vehicles)
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let selected = RwSignal::new(Screen::Vehicles.key().to_string());
    let screen = Memo::new(move |_| Screen::from_key(&selected.get()));

    view! {
        <div class="app">
            <nav class="app__nav">
                <TabList selected_value=selected>
                    {Screen::ALL
                        .into_iter()
                        .map(|s| view! {
                            <Tab value=s.key()>
                                {icon(s.icon())}
                                {s.label()}
                            </Tab>
                        })
                        .collect_view()}
                </TabList>
            </nav>
            <main class="app__content">
                {move || match screen.get() {
                    Screen::Vehicles => view! { <VehicleList /> }.into_any(),
                    Screen::Suppliers => view! { <SupplierList /> }.into_any(),
                    Screen::Maintenance => view! { <MaintenanceList /> }.into_any(),
                    Screen::Scheduling => view! { <ScheduledMaintenanceList /> }.into_any(),
                    Screen::Reports => view! { <MaintenanceReport /> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_keys_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_key(screen.key()), screen);
        }
        assert_eq!(Screen::from_key("inicio"), Screen::Vehicles);
    }
}
