//! Client configuration.
//!
//! Read from `bari.toml` (or the path given with `--config`); every key has a default, so a
//! missing file is the same as an empty one. `BARI_API_URL` and `BARI_TOKEN_FILE` override the
//! file.

use crate::api::RetryPolicy;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "bari.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin, e.g. "http://localhost:5000"
    pub base_url: String,
    /// Path prefix in front of every endpoint
    pub prefix: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            prefix: "/api".to_string(),
            timeout_secs: 30,
            user_agent: format!("bari/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The deployment's pinned city
    pub city: String,
    pub page_size: u32,
    /// How long a search result is served from cache
    pub stale_secs: u64,
    pub retries: u32,
    pub retry_base_ms: u64,
    pub retry_cap_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            city: "Dhaka".to_string(),
            page_size: 12,
            stale_secs: 300,
            retries: 2,
            retry_base_ms: 1000,
            retry_cap_ms: 30_000,
        }
    }
}

impl SearchConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            base: Duration::from_millis(self.retry_base_ms),
            cap: Duration::from_millis(self.retry_cap_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub token_file: PathBuf,
    pub refresh_skew_secs: i64,
    pub check_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from(".bari/tokens.json"),
            refresh_skew_secs: 300,
            check_interval_secs: 300,
        }
    }
}

impl Config {
    /// Loads `path`, or `bari.toml` in the working directory, then applies environment
    /// overrides. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Self::parse(&content).with_context(|| format!("invalid config in {}", path.display()))?
        } else {
            debug!("no config file at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overrides from `BARI_API_URL` and `BARI_TOKEN_FILE`, looked up through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("BARI_API_URL").filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(file) = var("BARI_TOKEN_FILE").filter(|v| !v.is_empty()) {
            self.session.token_file = PathBuf::from(file);
        }
    }
}
