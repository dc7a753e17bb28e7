//! `HttpTransport` backed by the browser's `fetch` through `gloo-net`.

use async_trait::async_trait;
use common::api::{ApiRequest, ApiResponse, HttpTransport, Method};
use gloo_net::http::{Request, RequestBuilder};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        let builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Patch => Request::patch(&request.url),
        }
        .header("Authorization", &request.authorization);

        let response = match request.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| e.to_string())?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| e.to_string())?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(ApiResponse { status, body })
    }
}
