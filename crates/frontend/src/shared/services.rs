//! Backend and third-party clients shared by all screens through context.

use super::api::{GlooTransport, RestClient};
use super::config::AppConfig;
use super::lookup::{DpaGeoLookup, GetApiPlateLookup};
use leptos::prelude::*;

#[derive(Clone)]
pub struct Services {
    pub api: RestClient<GlooTransport>,
    pub geo: DpaGeoLookup<GlooTransport>,
    pub plates: GetApiPlateLookup<GlooTransport>,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api: RestClient::new(GlooTransport, config.api_base()),
            geo: DpaGeoLookup::new(GlooTransport, config.lookups.geo_base_url.clone()),
            plates: GetApiPlateLookup::new(GlooTransport, config.lookups.plate_base_url.clone()),
        }
    }
}

/// Services provided by `App`
pub fn use_services() -> Services {
    use_context::<Services>().unwrap_or_else(|| {
        log::error!("Services context missing, falling back to defaults");
        Services::from_config(&AppConfig::default())
    })
}
