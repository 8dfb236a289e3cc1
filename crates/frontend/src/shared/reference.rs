//! Reference data for selectors.
//!
//! Every loader here answers with a collection, never an error: a failed
//! load is logged and yields an empty list so the screen still renders.

use super::api::{RestClient, Transport};
use super::lookup::GeoLookup;
use contracts::domain::a004_maintenance::aggregate::{MaintenanceType, MaintenanceTypesResponse};
use contracts::domain::common::AggregateRoot;
use serde::de::DeserializeOwned;

pub const MAINTENANCE_TYPES_PATH: &str = "/mantenciones/tipos_mantencion";

/// `GET path` as a list; empty on any failure
pub async fn load_collection<T, R>(api: &RestClient<T>, path: &str) -> Vec<R>
where
    T: Transport,
    R: DeserializeOwned,
{
    match api.get_json::<Vec<R>>(path).await {
        Ok(items) => items,
        Err(e) => {
            log::error!("Error cargando {}: {}", path, e);
            Vec::new()
        }
    }
}

/// Full collection of an aggregate
pub async fn load_all<T, R>(api: &RestClient<T>) -> Vec<R>
where
    T: Transport,
    R: AggregateRoot + DeserializeOwned,
{
    load_collection(api, &R::collection_path()).await
}

pub async fn load_maintenance_types<T: Transport>(api: &RestClient<T>) -> Vec<MaintenanceType> {
    match api
        .get_json::<MaintenanceTypesResponse>(MAINTENANCE_TYPES_PATH)
        .await
    {
        Ok(response) => response.into_vec(),
        Err(e) => {
            log::error!("Error cargando tipos de mantención: {}", e);
            Vec::new()
        }
    }
}

pub async fn load_regions(geo: &dyn GeoLookup) -> Vec<String> {
    geo.regions().await.unwrap_or_else(|e| {
        log::error!("Error cargando regiones: {}", e);
        Vec::new()
    })
}

pub async fn load_communes(geo: &dyn GeoLookup, region: &str) -> Vec<String> {
    if region.trim().is_empty() {
        return Vec::new();
    }
    geo.communes(region).await.unwrap_or_else(|e| {
        log::error!("Error cargando comunas de {}: {}", region, e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{FakeGeo, FakeTransport};
    use contracts::domain::a001_vehicle::aggregate::Vehicle;
    use contracts::domain::a004_maintenance::aggregate::Maintenance;
    use serde_json::json;

    #[tokio::test]
    async fn test_failed_loads_yield_empty_collections() {
        let fake = FakeTransport::new();
        fake.push_failure("offline");
        fake.push_json(500, json!({}));
        fake.push_json(200, json!({"unexpected": true}));
        let api = RestClient::new(fake, "http://api");

        assert!(load_all::<_, Vehicle>(&api).await.is_empty());
        assert!(load_all::<_, Vehicle>(&api).await.is_empty());
        assert!(load_all::<_, Vehicle>(&api).await.is_empty());
    }

    #[tokio::test]
    async fn test_collection_is_stored_verbatim() {
        let fake = FakeTransport::new();
        fake.push_json(
            200,
            json!([
                {"id": 2, "patente": "ZZ1111", "marca": "Kia", "modelo": "Rio", "anio": 2018, "kilometraje": 1},
                {"id": 1, "patente": "AA2222", "marca": "Fiat", "modelo": "Uno", "anio": 2001, "kilometraje": 2}
            ]),
        );
        let api = RestClient::new(fake.clone(), "http://api");
        let vehicles: Vec<Vehicle> = load_all(&api).await;
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].plate, "ZZ1111");
        assert_eq!(fake.requests()[0].url, "http://api/vehiculos");
    }

    #[tokio::test]
    async fn test_maintenance_listing_without_ids_is_kept() {
        let fake = FakeTransport::new();
        fake.push_json(
            200,
            json!([
                {"vehiculo_id": 1, "tipo_id": 2, "descripcion": "Aceite", "fecha": "2024-05-02",
                 "kilometraje": 1500, "costo": 20000.0, "proveedor_id": 3},
                {"vehiculo_id": 1, "tipo_id": 1, "descripcion": null, "fecha": "2024-06-10",
                 "kilometraje": 2100, "costo": 35000.0, "proveedor_id": 3}
            ]),
        );
        let api = RestClient::new(fake, "http://api");
        let records: Vec<Maintenance> = load_all(&api).await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|m| m.id.is_none()));
    }

    #[tokio::test]
    async fn test_maintenance_types_accept_wrapped_answer() {
        let fake = FakeTransport::new();
        fake.push_json(200, json!({"tipos": [{"id": 1, "nombre": "Preventiva"}]}));
        let api = RestClient::new(fake, "http://api");
        let types = load_maintenance_types(&api).await;
        assert_eq!(types[0].name, "Preventiva");
    }

    #[tokio::test]
    async fn test_geo_outage_and_blank_region() {
        let geo = FakeGeo {
            down: true,
            ..FakeGeo::default()
        };
        assert!(load_regions(&geo).await.is_empty());
        assert!(load_communes(&geo, "Biobío").await.is_empty());

        let geo = FakeGeo::with("Biobío", &["Concepción", "Talcahuano"]);
        assert!(load_communes(&geo, "").await.is_empty());
        assert_eq!(load_communes(&geo, "Biobío").await.len(), 2);
    }
}
