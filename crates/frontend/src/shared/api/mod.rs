//! REST access to the backend.
//!
//! [`RestClient`] knows the URL layout and how statuses map onto
//! [`ApiError`]; the actual I/O goes through a [`Transport`], which is
//! `gloo-net` in the browser and a scripted fake in tests.

pub mod browser;
pub mod error;

pub use browser::GlooTransport;
pub use error::{ApiError, DeleteMessages, EntityMessages, CONNECTION_MESSAGE};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Sends one request and hands back whatever the server answered.
///
/// Only a failure to get an answer at all is an error here; statuses are
/// interpreted by [`RestClient`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Join `base` and `path`, then append `query` pairs (values url-encoded).
pub fn build_url(base: &str, path: &str, query: &[(&str, &str)]) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), path);
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

#[derive(Clone)]
pub struct RestClient<T> {
    transport: T,
    base_url: String,
}

impl<T: Transport> RestClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method,
            url: build_url(&self.base_url, path, query),
            body,
        };
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(
                response.status,
                &response.body,
                method == Method::Delete,
            ))
        }
    }

    fn to_body<B: Serialize>(payload: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(payload).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `GET path`, decoded as JSON
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.call(Method::Get, path, &[], None).await?.json()
    }

    /// `POST path` with a JSON payload, answer decoded as JSON
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<R, ApiError> {
        let body = Self::to_body(payload)?;
        self.call(Method::Post, path, &[], Some(body)).await?.json()
    }

    /// Create a record in a collection
    pub async fn create<B: Serialize, R: DeserializeOwned>(
        &self,
        collection: &str,
        payload: &B,
    ) -> Result<R, ApiError> {
        self.post_json(collection, payload).await
    }

    /// `PUT collection/{id}`
    pub async fn update<B: Serialize, R: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
        payload: &B,
    ) -> Result<R, ApiError> {
        let body = Self::to_body(payload)?;
        let path = format!("{}/{}", collection, id);
        self.call(Method::Put, &path, &[], Some(body)).await?.json()
    }

    /// `DELETE collection/{id}`; the answer body is ignored
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}", collection, id);
        self.call(Method::Delete, &path, &[], None).await?;
        Ok(())
    }

    /// `POST` with a JSON payload, answer kept as raw bytes
    pub async fn post_binary<B: Serialize>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        payload: &B,
    ) -> Result<Vec<u8>, ApiError> {
        let body = Self::to_body(payload)?;
        Ok(self
            .call(Method::Post, path, query, Some(body))
            .await?
            .body)
    }
}
