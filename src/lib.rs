//! soap-relay - SOAP login client over public forwarding proxies
//!
//! Core library for envelope building, proxy fallback and response parsing.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod proxy;
pub mod render;
pub mod soap;
