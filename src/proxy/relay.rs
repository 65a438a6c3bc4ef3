//! Sequential proxy fallback
//!
//! Proxies are tried one at a time in declared order. The first attempt that
//! yields a 2xx response wins and its body is returned untouched; later
//! proxies are never contacted. Failed attempts are logged and collected,
//! and only total exhaustion is reported to the caller.

use std::time::Duration;

use tokio::time::timeout;
use url::Url;

use crate::config::Config;
use crate::error::{AttemptError, AttemptFailure, RelayError};
use crate::http::Exchange;
use crate::http::request::{Method, OutboundRequest, RequestBuilder};
use crate::proxy::endpoint::ProxyEndpoint;

/// Content type of SOAP 1.1 request bodies
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Relays SOAP requests through forwarding proxies
pub struct ProxyRelay<E> {
    /// Transport used for each attempt
    exchange: E,

    /// Proxies in preference order
    endpoints: Vec<ProxyEndpoint>,

    /// SOAP endpoint the proxies forward to
    target: Url,

    /// Service namespace, used for the SOAPAction header
    namespace: String,

    /// Deadline for one attempt, including reading the body
    attempt_timeout: Duration,
}

impl<E: Exchange> ProxyRelay<E> {
    /// Create a new relay
    pub fn new(
        exchange: E,
        endpoints: Vec<ProxyEndpoint>,
        target: Url,
        namespace: impl Into<String>,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            exchange,
            endpoints,
            target,
            namespace: namespace.into(),
            attempt_timeout,
        }
    }

    pub fn from_config(exchange: E, cfg: &Config) -> anyhow::Result<Self> {
        let endpoints = cfg.proxies.iter().cloned().map(ProxyEndpoint::new).collect();
        Ok(Self::new(
            exchange,
            endpoints,
            cfg.target()?,
            cfg.namespace.clone(),
            cfg.attempt_timeout(),
        ))
    }

    pub fn endpoints(&self) -> &[ProxyEndpoint] {
        &self.endpoints
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Value of the `SOAPAction` header for `operation`.
    pub fn soap_action(&self, operation: &str) -> String {
        format!("{}#{}", self.namespace, operation)
    }

    /// Build the request sent to one proxy
    ///
    /// Note: This method is made public for integration testing purposes
    pub fn build_request(
        &self,
        endpoint: &ProxyEndpoint,
        body: &str,
        operation: &str,
    ) -> Result<OutboundRequest, AttemptError> {
        let url = endpoint
            .forwarding_url(&self.target)
            .map_err(|e| AttemptError::InvalidUrl(e.to_string()))?;

        RequestBuilder::new()
            .method(Method::POST)
            .url(url)
            .header("Content-Type", SOAP_CONTENT_TYPE)
            .header("SOAPAction", self.soap_action(operation))
            // Some forwarding services refuse requests without it.
            .header("X-Requested-With", "XMLHttpRequest")
            .body(body)
            .build()
            .map_err(|e| AttemptError::InvalidUrl(e.to_string()))
    }

    /// Deliver `body` for `operation` and return the raw reply text.
    ///
    /// This function:
    /// 1. Walks the proxy list in order
    /// 2. Sends the request through the current proxy under the attempt deadline
    /// 3. Returns the body of the first 2xx response
    /// 4. Otherwise records the failure and moves on to the next proxy
    pub async fn send(&self, body: &str, operation: &str) -> Result<String, RelayError> {
        let mut failures = Vec::with_capacity(self.endpoints.len());

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            let attempt = index + 1;

            tracing::debug!(
                proxy = endpoint.display_name(),
                attempt,
                total = self.endpoints.len(),
                operation,
                "Trying proxy"
            );

            match self.attempt(endpoint, body, operation).await {
                Ok(text) => {
                    tracing::info!(
                        proxy = endpoint.display_name(),
                        operation,
                        attempt,
                        bytes = text.len(),
                        "Request relayed successfully"
                    );
                    return Ok(text);
                }
                Err(error) => {
                    tracing::warn!(
                        proxy = endpoint.display_name(),
                        error = %error,
                        operation,
                        attempt,
                        "Proxy attempt failed, trying next"
                    );
                    failures.push(AttemptFailure {
                        proxy: endpoint.display_name().to_string(),
                        error,
                    });
                }
            }
        }

        tracing::error!(operation, attempts = failures.len(), "All proxies failed");

        Err(RelayError::Exhausted {
            attempts: failures.len(),
            failures,
        })
    }

    /// One attempt through one proxy
    async fn attempt(
        &self,
        endpoint: &ProxyEndpoint,
        body: &str,
        operation: &str,
    ) -> Result<String, AttemptError> {
        let request = self.build_request(endpoint, body, operation)?;

        let response = timeout(self.attempt_timeout, self.exchange.execute(request))
            .await
            .map_err(|_| AttemptError::Timeout(self.attempt_timeout))?
            .map_err(|e| AttemptError::Transport(format!("{e:#}")))?;

        if !response.is_success() {
            return Err(AttemptError::Status(response.status));
        }

        Ok(response.text())
    }
}
