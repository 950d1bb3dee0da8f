//! Transport seam between request building and the network.

use crate::{FetchError, RequestBuilder, Response};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Executes a fully built request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and buffer the whole response.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with an explicit request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = request.build_url()?;
        let mut builder = self
            .client
            .request(http::Method::from(request.method), url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}
