//! `reqwest`-backed [`Exchange`].

use std::time::Duration;

use anyhow::{Context, Result};

use crate::http::Exchange;
use crate::http::request::{Method, OutboundRequest};
use crate::http::response::InboundResponse;

/// Production transport. Holds a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    client: reqwest::Client,
}

impl HttpExchange {
    /// Creates a client with the given TCP/TLS connect timeout.
    ///
    /// The overall per-attempt deadline is enforced by the relay, not here.
    pub fn new(connect_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Wraps a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::GET => reqwest::Method::GET,
        Method::POST => reqwest::Method::POST,
    }
}

impl Exchange for HttpExchange {
    async fn execute(&self, request: OutboundRequest) -> Result<InboundResponse> {
        tracing::trace!(method = request.method.as_str(), url = %request.url, "Sending request");

        let mut builder = self.client.request(to_reqwest(request.method), request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .context("Failed to reach proxy")?;

        let status = response.status().as_u16();
        tracing::trace!(status, "Proxy responded");

        let body = response
            .bytes()
            .await
            .context("Failed to read response body")?;

        Ok(InboundResponse::new(status, body))
    }
}
