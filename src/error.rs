//! Error types for proxy relaying.
//!
//! Only transport-level problems are errors. Faults and malformed or
//! rejected replies from the upstream are reported as
//! [`RemoteResult::Failure`](crate::soap::RemoteResult) values instead.

use std::time::Duration;

/// Why a single proxy attempt was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    /// The attempt did not complete within the per-attempt deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The proxy answered with a non-2xx status.
    #[error("proxy returned status {0}")]
    Status(u16),

    /// Connection, TLS or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The proxy template and target did not combine into a valid URL.
    #[error("invalid forwarding URL: {0}")]
    InvalidUrl(String),
}

/// A failed attempt, tagged with the proxy that was tried.
#[derive(Debug)]
pub struct AttemptFailure {
    pub proxy: String,
    pub error: AttemptError,
}

/// Errors surfaced by [`ProxyRelay::send`](crate::proxy::ProxyRelay::send).
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Every configured proxy was tried and none produced a 2xx response.
    #[error("all proxies failed, please try again later")]
    Exhausted {
        /// Number of proxies tried.
        attempts: usize,
        /// Per-proxy failures, in the order they were tried.
        failures: Vec<AttemptFailure>,
    },
}
