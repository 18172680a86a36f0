//! Application configuration management.
//!
//! Configuration is stored at `~/.config/leaguegrid/config.json`. Every field
//! can be overridden from the environment (a `.env` file is loaded by the
//! binary before `Config::load` runs):
//!
//! - `LEAGUEGRID_URL`: popular leagues endpoint
//! - `LEAGUEGRID_API_KEY`: value of the `x-rapidapi-key` header
//! - `LEAGUEGRID_API_HOST`: value of the `x-rapidapi-host` header
//! - `LEAGUEGRID_FRESHNESS_SECS`: freshness threshold in seconds

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "leaguegrid";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Cached data is served without a request for this long.
pub const DEFAULT_FRESHNESS_SECS: u64 = 5 * 60;

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Seconds between network reachability probes.
const DEFAULT_PROBE_INTERVAL_SECS: u64 = 10;

const ENV_URL: &str = "LEAGUEGRID_URL";
const ENV_API_KEY: &str = "LEAGUEGRID_API_KEY";
const ENV_API_HOST: &str = "LEAGUEGRID_API_HOST";
const ENV_FRESHNESS_SECS: &str = "LEAGUEGRID_FRESHNESS_SECS";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    pub freshness_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub probe_interval_secs: Option<u64>,
}

/// Validated settings needed to talk to the API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub endpoint: Url,
    pub api_key: String,
    pub api_host: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            Ok(_) => Self::default(),
            Err(e) => {
                warn!(error = %e, "No config directory, using environment only");
                Self::default()
            }
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files.
    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Override fields from environment variables. The lookup is injected so
    /// tests don't have to touch the process environment.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_URL) {
            self.endpoint = Some(url);
        }
        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(host) = non_empty(ENV_API_HOST) {
            self.api_host = Some(host);
        }
        if let Some(raw) = non_empty(ENV_FRESHNESS_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.freshness_secs = Some(secs),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid {}", ENV_FRESHNESS_SECS),
            }
        }
    }

    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs.unwrap_or(DEFAULT_FRESHNESS_SECS))
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.unwrap_or(DEFAULT_PROBE_INTERVAL_SECS).max(1))
    }

    /// Validate and collect the settings the API client needs.
    pub fn api_settings(&self) -> Result<ApiSettings> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No API endpoint configured (set {})", ENV_URL))?;
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid API endpoint URL: {}", endpoint))?;

        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No API key configured (set {})", ENV_API_KEY))?;

        // The host header defaults to the endpoint's host, which is what RapidAPI expects
        let api_host = match self.api_host.clone() {
            Some(host) => host,
            None => endpoint
                .host_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("No API host configured (set {})", ENV_API_HOST))?,
        };

        Ok(ApiSettings {
            endpoint,
            api_key,
            api_host,
            request_timeout: Duration::from_secs(
                self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        })
    }
}
