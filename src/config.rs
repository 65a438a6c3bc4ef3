//! Runtime configuration.
//!
//! Defaults are compiled in. A YAML file named by `SOAP_RELAY_CONFIG` may
//! replace any of them, and `SOAP_RELAY_TARGET` / `SOAP_RELAY_TIMEOUT_MS`
//! override the file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use url::Url;

use crate::proxy::endpoint::DEFAULT_PROXIES;
use crate::soap::DEFAULT_NAMESPACE;

pub const CONFIG_ENV: &str = "SOAP_RELAY_CONFIG";
pub const TARGET_ENV: &str = "SOAP_RELAY_TARGET";
pub const TIMEOUT_ENV: &str = "SOAP_RELAY_TIMEOUT_MS";

pub const DEFAULT_TARGET_URL: &str =
    "http://isapi.mekashron.com/icu-tech/icutech-test.dll/soap/IICUTech";
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// One forwarding proxy, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyConfig {
    /// URL template; the percent-encoded target is appended to it
    pub url: String,
    /// Optional name for logging
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_url: String,
    pub namespace: String,
    pub proxies: Vec<ProxyConfig>,
    pub attempt_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            proxies: DEFAULT_PROXIES
                .iter()
                .map(|url| ProxyConfig {
                    url: url.to_string(),
                    name: None,
                })
                .collect(),
            attempt_timeout_ms: DEFAULT_ATTEMPT_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Loads defaults, then the optional YAML file, then env overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(target) = std::env::var(TARGET_ENV) {
            cfg.target_url = target;
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            cfg.attempt_timeout_ms = timeout
                .trim()
                .parse()
                .with_context(|| format!("{TIMEOUT_ENV} is not a number of milliseconds"))?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parses a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text).context("Failed to parse YAML config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.target_url)
            .with_context(|| format!("Invalid target URL {:?}", self.target_url))?;
        if self.proxies.is_empty() {
            bail!("At least one proxy must be configured");
        }
        if self.attempt_timeout_ms == 0 {
            bail!("attempt_timeout_ms must be greater than zero");
        }
        if self.connect_timeout_ms == 0 {
            bail!("connect_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn target(&self) -> Result<Url> {
        Url::parse(&self.target_url).context("Invalid target URL")
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
