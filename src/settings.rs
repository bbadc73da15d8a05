use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::adapters::uniswap_v3::DEFAULT_FEE_TIERS;
use crate::pools::SizingParams;

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Name reported by `/health`
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3005
}
fn default_service_name() -> String {
    "venue-service".to_string()
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            service_name: default_service_name(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Rpc {
    /// JSON-RPC endpoint. Empty means fallback-only mode.
    #[serde(default)]
    pub url: String,
    /// Upper bound for one full venue fetch
    #[serde(default = "default_fetch_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_fetch_timeout_seconds() -> u64 {
    20
}

impl Default for Rpc {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_seconds: default_fetch_timeout_seconds(),
        }
    }
}

impl Rpc {
    pub fn url(&self) -> Option<&str> {
        let trimmed = self.url.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Cache {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

fn default_ttl_seconds() -> u64 {
    300 // 5 minutes
}

impl Default for Cache {
    fn default() -> Self {
        Self { ttl_seconds: default_ttl_seconds() }
    }
}

impl Cache {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Contracts {
    #[serde(default = "default_uniswap_v3_factory")]
    pub uniswap_v3_factory: String,
    #[serde(default = "default_sushiswap_factory")]
    pub sushiswap_factory: String,
    #[serde(default = "default_fee_tiers")]
    pub uniswap_v3_fee_tiers: Vec<u32>,
}

fn default_uniswap_v3_factory() -> String {
    "0x1F98431c8aD98523631AE4a59f267346ea31F984".to_string()
}
fn default_sushiswap_factory() -> String {
    "0xC0AEe478e3658e2610c5F7A4A2E1777cE9e4f2Ac".to_string()
}
fn default_fee_tiers() -> Vec<u32> {
    DEFAULT_FEE_TIERS.to_vec()
}

impl Default for Contracts {
    fn default() -> Self {
        Self {
            uniswap_v3_factory: default_uniswap_v3_factory(),
            sushiswap_factory: default_sushiswap_factory(),
            uniswap_v3_fee_tiers: default_fee_tiers(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Observability {
    /// Prometheus exporter address (only used with the `observability` feature)
    #[serde(default = "default_metrics_listen")]
    pub metrics_listen: String,
}

fn default_metrics_listen() -> String {
    "0.0.0.0:9000".to_string()
}

impl Default for Observability {
    fn default() -> Self {
        Self { metrics_listen: default_metrics_listen() }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub rpc: Rpc,
    #[serde(default)]
    pub cache: Cache,
    #[serde(default)]
    pub contracts: Contracts,
    #[serde(default)]
    pub sizing: SizingParams,
    #[serde(default)]
    pub observability: Observability,
}

impl Settings {
    /// Loads `Config.toml` from the working directory when present, then applies
    /// environment overrides.
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("Config").required(false))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;
        settings.apply_env_overrides(|key| env::var(key).ok());
        Ok(settings)
    }

    /// Loads an explicit config file. No environment overrides are applied.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    /// `ETH_SEPOLIA_RPC_URL` wins over `ETH_RPC_URL`; `PORT` and `HOST` override the listener.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = non_empty("ETH_SEPOLIA_RPC_URL").or_else(|| non_empty("ETH_RPC_URL")) {
            self.rpc.url = url;
        }
        if let Some(raw_port) = non_empty("PORT") {
            match raw_port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => log::warn!("Ignoring invalid PORT {:?}: {}", raw_port, e),
            }
        }
        if let Some(host) = non_empty("HOST") {
            self.server.host = host;
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
