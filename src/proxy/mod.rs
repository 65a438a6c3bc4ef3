//! Proxy relay
//!
//! This module implements delivery of SOAP requests through an ordered list
//! of public forwarding proxies, falling back to the next proxy whenever an
//! attempt fails.

pub mod endpoint;
pub mod relay;

pub use endpoint::{DEFAULT_PROXIES, ProxyEndpoint};
pub use relay::ProxyRelay;
