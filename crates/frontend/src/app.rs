use crate::routes::AppRoutes;
use crate::shared::config::{load_config, AppConfig};
use crate::shared::services::Services;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config().unwrap_or_else(|e| {
        log::error!("Configuración inválida, usando valores por defecto: {:#}", e);
        AppConfig::default()
    });
    log::info!("Backend en {}", config.api_base());

    provide_context(Services::from_config(&config));
    provide_context(config);

    view! {
        <AppRoutes />
    }
}
