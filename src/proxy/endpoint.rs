//! Forwarding proxy descriptors
//!
//! A proxy is described by a URL template. The forwarding URL for a request
//! is the template followed by the percent-encoded target URL.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::config::ProxyConfig;

/// Characters left unescaped in a URI component: alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Proxies tried by default, in preference order.
pub const DEFAULT_PROXIES: &[&str] = &[
    "https://cors-anywhere.herokuapp.com/",
    "https://api.codetabs.com/v1/proxy?quest=",
    "https://corsproxy.io/?",
    "https://thingproxy.freeboard.io/fetch/",
];

/// A forwarding proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    /// URL template (e.g., "https://corsproxy.io/?")
    pub template: String,

    /// Optional proxy name for logging
    pub name: Option<String>,
}

impl ProxyEndpoint {
    /// Create a proxy endpoint from configuration
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            template: config.url,
            name: config.name,
        }
    }

    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            name: None,
        }
    }

    /// Get a display name for the proxy (name or template)
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.template)
    }

    /// Builds the URL that asks this proxy to forward to `target`.
    ///
    /// ```
    /// # use soap_relay::proxy::ProxyEndpoint;
    /// let proxy = ProxyEndpoint::from_template("https://corsproxy.io/?");
    /// let target = url::Url::parse("http://example.com/soap").unwrap();
    /// assert_eq!(
    ///     proxy.forwarding_url(&target).unwrap().as_str(),
    ///     "https://corsproxy.io/?http%3A%2F%2Fexample.com%2Fsoap"
    /// );
    /// ```
    pub fn forwarding_url(&self, target: &Url) -> Result<Url, url::ParseError> {
        let encoded = utf8_percent_encode(target.as_str(), URI_COMPONENT);
        Url::parse(&format!("{}{}", self.template, encoded))
    }
}

