//! Outbound HTTP plumbing.
//!
//! The relay talks to forwarding proxies through the [`Exchange`] trait so the
//! fallback logic can be driven by any transport:
//!
//! - **`request`**: outbound request representation with a builder
//! - **`response`**: status and body of a completed exchange
//! - **`client`**: the production [`Exchange`] backed by `reqwest`
//!
//! # Example
//!
//! ```ignore
//! use soap_relay::http::{Exchange, client::HttpExchange, request::{Method, RequestBuilder}};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let exchange = HttpExchange::new(Duration::from_secs(5))?;
//!     let request = RequestBuilder::new()
//!         .method(Method::POST)
//!         .url(url::Url::parse("http://localhost:8080/soap")?)
//!         .header("Content-Type", "text/xml; charset=utf-8")
//!         .body("<Envelope/>")
//!         .build()
//!         .map_err(anyhow::Error::msg)?;
//!     let response = exchange.execute(request).await?;
//!     println!("{} {}", response.status, response.text());
//!     Ok(())
//! }
//! ```

use std::future::Future;

pub mod client;
pub mod request;
pub mod response;

pub use request::{Method, OutboundRequest, RequestBuilder};
pub use response::InboundResponse;

/// One request/response round trip.
///
/// Implementations report transport failures (DNS, connect, TLS, broken
/// connections, unreadable bodies) as errors. Any HTTP status, including
/// error statuses, is a successful exchange.
pub trait Exchange: Send + Sync {
    fn execute(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = anyhow::Result<InboundResponse>> + Send;
}
