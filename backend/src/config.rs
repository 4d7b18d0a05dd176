use std::{net::SocketAddr, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_DIRECTIONS_URL: &str = "https://routing.openstreetmap.de/routed-foot";
pub const DEFAULT_USER_AGENT: &str = concat!("pinmap/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Runtime settings, read from `PINMAP_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub geocoder_url: String,
    pub directions_url: String,
    pub user_agent: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("PINMAP_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|_| ConfigError::Invalid {
                key: "PINMAP_BIND_ADDR",
                value,
            })?;
        }
        if let Some(value) = lookup("PINMAP_GEOCODER_URL") {
            config.geocoder_url = value;
        }
        if let Some(value) = lookup("PINMAP_DIRECTIONS_URL") {
            config.directions_url = value;
        }
        if let Some(value) = lookup("PINMAP_USER_AGENT") {
            config.user_agent = value;
        }
        if let Some(value) = lookup("PINMAP_HTTP_TIMEOUT_SECS") {
            let secs = value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: "PINMAP_HTTP_TIMEOUT_SECS",
                    value,
                })?;
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Shared client for the geocoder and directions services.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.http_timeout)
            .build()?;
        Ok(client)
    }
}
