use super::{ApiError, ApiRequest, ApiResponse, Method, Transport};
use async_trait::async_trait;
use gloo_net::http::Request;

/// [`Transport`] over the browser's `fetch`, via gloo-net.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn connection(e: gloo_net::Error) -> ApiError {
    ApiError::Connection(e.to_string())
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        log::debug!("{:?} {}", request.method, request.url);

        let response = match &request.body {
            Some(body) => builder.json(body).map_err(connection)?.send().await,
            None => builder.send().await,
        }
        .map_err(connection)?;

        let status = response.status();
        let body = response.binary().await.map_err(connection)?;
        if !(200..300).contains(&status) {
            log::warn!("{} answered {}", request.url, status);
        }
        Ok(ApiResponse { status, body })
    }
}
