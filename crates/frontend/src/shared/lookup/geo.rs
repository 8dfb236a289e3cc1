use super::LookupError;
use crate::shared::api::{ApiRequest, Method, Transport};
use async_trait::async_trait;
use serde::Deserialize;

/// Chilean administrative division, by name.
#[async_trait(?Send)]
pub trait GeoLookup {
    /// Region names
    async fn regions(&self) -> Result<Vec<String>, LookupError>;

    /// Commune names of the region called `region_name`.
    /// An unknown region yields an empty list.
    async fn communes(&self, region_name: &str) -> Result<Vec<String>, LookupError>;
}

#[derive(Debug, Clone, Deserialize)]
struct Division {
    codigo: String,
    nombre: String,
}

/// [`GeoLookup`] backed by the public DPA service
#[derive(Clone)]
pub struct DpaGeoLookup<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> DpaGeoLookup<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<Vec<Division>, LookupError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .transport
            .send(ApiRequest {
                method: Method::Get,
                url,
                body: None,
            })
            .await
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;
        if !response.is_success() {
            return Err(LookupError::Unreachable(format!("HTTP {}", response.status)));
        }
        response
            .json::<Vec<Division>>()
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

#[async_trait(?Send)]
impl<T: Transport> GeoLookup for DpaGeoLookup<T> {
    async fn regions(&self) -> Result<Vec<String>, LookupError> {
        Ok(self
            .fetch("/regiones")
            .await?
            .into_iter()
            .map(|r| r.nombre)
            .collect())
    }

    async fn communes(&self, region_name: &str) -> Result<Vec<String>, LookupError> {
        let regions = self.fetch("/regiones").await?;
        let Some(region) = regions.into_iter().find(|r| r.nombre == region_name) else {
            log::warn!("Región no encontrada al buscar comunas: {}", region_name);
            return Ok(Vec::new());
        };
        let path = format!("/regiones/{}/comunas", region.codigo);
        Ok(self
            .fetch(&path)
            .await?
            .into_iter()
            .map(|c| c.nombre)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::FakeTransport;
    use serde_json::json;

    fn regions() -> serde_json::Value {
        json!([
            {"codigo": "08", "nombre": "Biobío", "tipo": "region"},
            {"codigo": "13", "nombre": "Metropolitana de Santiago"}
        ])
    }

    #[tokio::test]
    async fn test_communes_resolve_region_code_by_name() {
        let fake = FakeTransport::new();
        fake.push_json(200, regions());
        fake.push_json(200, json!([{"codigo": "08101", "nombre": "Concepción"}]));
        let geo = DpaGeoLookup::new(fake.clone(), "http://dpa/");

        let communes = geo.communes("Biobío").await.unwrap();
        assert_eq!(communes, vec!["Concepción".to_string()]);
        assert_eq!(fake.requests()[1].url, "http://dpa/regiones/08/comunas");
    }

    #[tokio::test]
    async fn test_unknown_region_gives_no_communes() {
        let fake = FakeTransport::new();
        fake.push_json(200, regions());
        let geo = DpaGeoLookup::new(fake.clone(), "http://dpa");

        assert!(geo.communes("Atlántida").await.unwrap().is_empty());
        assert_eq!(fake.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_reported() {
        let fake = FakeTransport::new();
        fake.push_failure("dns");
        fake.push_json(503, json!({}));
        fake.push_raw(200, b"<html>".to_vec());
        let geo = DpaGeoLookup::new(fake, "http://dpa");

        assert!(matches!(geo.regions().await, Err(LookupError::Unreachable(_))));
        assert!(matches!(geo.regions().await, Err(LookupError::Unreachable(_))));
        assert!(matches!(geo.regions().await, Err(LookupError::Parse(_))));
    }
}
