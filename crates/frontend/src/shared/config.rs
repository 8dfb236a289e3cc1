use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub lookups: LookupConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Full backend URL. When empty the page's host is used with `port`.
    #[serde(default)]
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LookupConfig {
    /// Geographic division service (regions and communes)
    pub geo_base_url: String,
    /// Vehicle plate lookup service
    pub plate_base_url: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 8000

[lookups]
geo_base_url = "https://corsproxy.io/?https://apis.digital.gob.cl/dpa"
plate_base_url = "https://chile.getapi.cl/v1/vehicles/plate"
"#;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: String::new(),
                port: 8000,
            },
            lookups: LookupConfig {
                geo_base_url: "https://corsproxy.io/?https://apis.digital.gob.cl/dpa".to_string(),
                plate_base_url: "https://chile.getapi.cl/v1/vehicles/plate".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Backend base URL, derived from the page location when not configured
    pub fn api_base(&self) -> String {
        if self.api.base_url.trim().is_empty() {
            crate::shared::api_utils::api_base(self.api.port)
        } else {
            self.api.base_url.trim_end_matches('/').to_string()
        }
    }
}

/// Load the configuration.
///
/// A TOML document given through `FLEET_CONFIG` at build time wins over the
/// embedded default.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let source = match option_env!("FLEET_CONFIG") {
        Some(custom) => {
            log::info!("Using configuration from FLEET_CONFIG");
            custom
        }
        None => DEFAULT_CONFIG,
    };
    parse_config(source)
}

fn parse_config(source: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(source)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.port, 8000);
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = parse_config(
            r#"
[api]
base_url = "http://backend:9000/"
port = 8000

[lookups]
geo_base_url = "http://geo"
plate_base_url = "http://plates"
"#,
        )
        .unwrap();
        assert_eq!(config.api_base(), "http://backend:9000");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(parse_config("[api]\nport = \"x\"").is_err());
    }
}
