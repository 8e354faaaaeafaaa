//! Configuration for bunny-dns-webhook.
//!
//! Values come from an optional TOML file (path in `BUNNY_WEBHOOK_CONFIG`),
//! then environment variables override individual keys.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use bunny_dns_provider::{ClientConfig, DomainFilter, mask_secret};
use serde::{Deserialize, Serialize};

/// Environment variable holding the config file path.
pub const CONFIG_PATH_ENV: &str = "BUNNY_WEBHOOK_CONFIG";

const DEFAULT_API_URL: &str = "https://api.bunny.net";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Address of the webhook API (external-dns talks to this).
    pub listen_addr: String,

    /// Address of the liveness probe.
    pub probe_addr: String,

    /// Domain suffixes to manage. Empty manages every zone on the account.
    pub domain_filter: Vec<String>,

    /// bunny.net API settings.
    pub bunny: BunnyConfig,

    /// Logging settings.
    pub log: LogConfig,
}

/// bunny.net API settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BunnyConfig {
    /// Account API key. Required.
    pub api_key: String,

    /// API base URL.
    pub api_url: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive (e.g., "info", "bunny_dns_provider=debug,info").
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Output format on stderr.
    pub format: LogFormat,

    /// Directory for daily-rolling log files. Stderr only when unset.
    pub dir: Option<PathBuf>,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format '{other}', expected 'text' or 'json'"),
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            listen_addr: "localhost:8888".to_string(),
            probe_addr: "localhost:8080".to_string(),
            domain_filter: Vec::new(),
            bunny: BunnyConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for BunnyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            dir: None,
        }
    }
}

// API key stays out of logs
impl fmt::Debug for BunnyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BunnyConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl WebhookConfig {
    /// Load from the file named by `BUNNY_WEBHOOK_CONFIG` (if any), apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Parse TOML; missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override keys from the environment, looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LISTEN_ADDR") {
            self.listen_addr = v;
        }
        if let Some(v) = lookup("PROBE_ADDR") {
            self.probe_addr = v;
        }
        if let Some(v) = lookup("BUNNYNET_API_KEY") {
            self.bunny.api_key = v;
        }
        if let Some(v) = lookup("BUNNYNET_API_URL") {
            self.bunny.api_url = v;
        }
        if let Some(v) = lookup("DOMAIN_FILTER") {
            self.domain_filter = v
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.log.level = v;
        }
        if let Some(v) = lookup("LOG_FORMAT") {
            self.log.format = v.parse()?;
        }
        if let Some(v) = lookup("LOG_DIR") {
            self.log.dir = (!v.is_empty()).then(|| PathBuf::from(v));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.bunny.api_key.trim().is_empty() {
            bail!("bunny.net API key is required (set BUNNYNET_API_KEY)");
        }
        if self.bunny.api_url.trim().is_empty() {
            bail!("bunny.net API URL must not be empty");
        }
        Ok(())
    }

    /// Settings for the bunny.net HTTP client.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.bunny.api_key.clone());
        config.api_url.clone_from(&self.bunny.api_url);
        config.user_agent = format!("bunny-dns-webhook/{}", env!("CARGO_PKG_VERSION"));
        config
    }

    pub fn domain_filter(&self) -> DomainFilter {
        DomainFilter::new(self.domain_filter.clone())
    }
}
