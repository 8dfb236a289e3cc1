use super::LookupError;
use crate::shared::api::{ApiRequest, Method, Transport};
use async_trait::async_trait;
use serde::Deserialize;

/// What the plate registry knows about a vehicle
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlateInfo {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Sent either as a number or as a string
    #[serde(default)]
    pub year: Option<serde_json::Value>,
}

impl PlateInfo {
    pub fn brand(&self) -> Option<&str> {
        self.make
            .as_deref()
            .or(self.manufacturer.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn year(&self) -> Option<String> {
        match self.year.as_ref()? {
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

#[async_trait(?Send)]
pub trait PlateLookup {
    /// `Ok(None)` when the registry does not know the plate
    async fn lookup_plate(&self, plate: &str) -> Result<Option<PlateInfo>, LookupError>;
}

/// [`PlateLookup`] backed by GetAPI
#[derive(Clone)]
pub struct GetApiPlateLookup<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> GetApiPlateLookup<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl<T: Transport> PlateLookup for GetApiPlateLookup<T> {
    async fn lookup_plate(&self, plate: &str) -> Result<Option<PlateInfo>, LookupError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(plate)
        );
        let response = self
            .transport
            .send(ApiRequest {
                method: Method::Get,
                url,
                body: None,
            })
            .await
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;

        // 400/404 and friends mean "not found"
        if !response.is_success() {
            return Ok(None);
        }
        response
            .json::<PlateInfo>()
            .map(Some)
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}
