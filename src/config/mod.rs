#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{ProxyError, Result};
use crate::utils::validation::{
    validate_base_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliArgs;

/// Environment variable holding the upstream base URL.
pub const UPSTREAM_ENV: &str = "API_BASE_URL";
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.kalimatirate.nyure.com.np/api/";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upstream: Option<String>,
    pub base_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub json_logs: bool,
    pub verbose: bool,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: IpAddr,
    pub port: u16,
    pub base_path: String,
    pub upstream_base_url: String,
    pub timeout_seconds: Option<u64>,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_string(),
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            timeout_seconds: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl ProxyConfig {
    /// Resolves the configuration from the process environment.
    pub fn load(file: Option<&TomlConfig>, overrides: &ConfigOverrides) -> Result<Self> {
        let env_upstream = std::env::var(UPSTREAM_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        Self::resolve(file, env_upstream, overrides)
    }

    /// Merges the sources: CLI overrides, then `API_BASE_URL` (upstream URL
    /// only), then the TOML file, then the built-in defaults.
    pub fn resolve(
        file: Option<&TomlConfig>,
        env_upstream: Option<String>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let defaults = Self::default();

        let host = match overrides
            .host
            .as_deref()
            .or_else(|| file.and_then(TomlConfig::host))
        {
            Some(raw) => raw
                .parse::<IpAddr>()
                .map_err(|e| ProxyError::InvalidConfigValueError {
                    field: "server.host".to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                })?,
            None => defaults.host,
        };

        let upstream_base_url = overrides
            .upstream
            .clone()
            .or(env_upstream)
            .or_else(|| file.and_then(TomlConfig::upstream_base_url).map(str::to_string))
            .unwrap_or(defaults.upstream_base_url);

        Ok(Self {
            host,
            port: overrides
                .port
                .or_else(|| file.and_then(TomlConfig::port))
                .unwrap_or(defaults.port),
            base_path: overrides
                .base_path
                .clone()
                .or_else(|| file.and_then(TomlConfig::base_path).map(str::to_string))
                .unwrap_or(defaults.base_path),
            upstream_base_url,
            timeout_seconds: overrides
                .timeout_seconds
                .or_else(|| file.and_then(TomlConfig::timeout_seconds)),
            json_logs: overrides.json_logs
                || file.and_then(TomlConfig::json_logs).unwrap_or(false),
            verbose: overrides.verbose || file.and_then(TomlConfig::verbose).unwrap_or(false),
        })
    }
}

impl ConfigProvider for ProxyConfig {
    fn upstream_base_url(&self) -> &str {
        &self.upstream_base_url
    }

    fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for ProxyConfig {
    fn validate(&self) -> Result<()> {
        validate_url("upstream.base_url", &self.upstream_base_url)?;
        validate_base_path("server.base_path", &self.base_path)?;

        if self.port == 0 {
            return Err(ProxyError::InvalidConfigValueError {
                field: "server.port".to_string(),
                value: self.port.to_string(),
                reason: "Port cannot be zero".to_string(),
            });
        }

        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("upstream.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}
