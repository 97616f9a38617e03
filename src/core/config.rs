//! Configuration parsing and validation.
//!
//! Node configuration is loaded from a TOML file with CLI overrides and then
//! turned into a [`Context`]. Every section and key is optional.

use crate::core::context::{
    Context, DEFAULT_ADDR, DEFAULT_CACHE_SIZE, DEFAULT_CERTS_DIR, DEFAULT_GOSSIP_INTERVAL,
    DEFAULT_MAX_OFFSET, DEFAULT_SCAN_INTERVAL,
};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Valid values for `telemetry.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level node configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Node identity and timing.
    #[serde(default)]
    pub node: NodeConfig,

    /// Store specifications and cache budget.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Gossip bootstrap.
    #[serde(default)]
    pub gossip: GossipConfig,

    /// Certificate material.
    #[serde(default)]
    pub tls: TlsConfig,

    /// Logging.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Node identity and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// host:port to bind for HTTP/RPC traffic.
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Colon-separated node attributes.
    #[serde(default)]
    pub attrs: String,

    /// Enable linearizable commit timestamps.
    #[serde(default)]
    pub linearizable: bool,

    /// Maximum clock offset in milliseconds.
    #[serde(default = "default_max_offset_ms")]
    pub max_offset_ms: u64,

    /// Range scan interval in milliseconds.
    #[serde(default = "default_scan_interval_ms")]
    pub scan_interval_ms: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            attrs: String::new(),
            linearizable: false,
            max_offset_ms: default_max_offset_ms(),
            scan_interval_ms: default_scan_interval_ms(),
        }
    }
}

/// Store specifications and cache budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store specification, e.g. `ssd=/mnt/ssd01,mem=1073741824`.
    #[serde(default)]
    pub stores: String,

    /// Cache budget in bytes shared by disk-backed stores.
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            stores: String::new(),
            cache_size: default_cache_size(),
        }
    }
}

/// Gossip bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GossipConfig {
    /// Comma-separated bootstrap resolvers; `self://` names this node.
    #[serde(default)]
    pub bootstrap: String,

    /// Gossip interval in milliseconds.
    #[serde(default = "default_gossip_interval_ms")]
    pub interval_ms: u64,
}

impl Default for GossipConfig {
    fn default() -> Self {
        Self {
            bootstrap: String::new(),
            interval_ms: default_gossip_interval_ms(),
        }
    }
}

/// Certificate material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Directory holding `ca.crt`, `node.crt` and `node.key`.
    #[serde(default = "default_certs")]
    pub certs: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            certs: default_certs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions

fn default_addr() -> String {
    DEFAULT_ADDR.to_string()
}

fn default_certs() -> String {
    DEFAULT_CERTS_DIR.to_string()
}

fn default_max_offset_ms() -> u64 {
    DEFAULT_MAX_OFFSET.as_millis() as u64
}

fn default_scan_interval_ms() -> u64 {
    DEFAULT_SCAN_INTERVAL.as_millis() as u64
}

fn default_gossip_interval_ms() -> u64 {
    DEFAULT_GOSSIP_INTERVAL.as_millis() as u64
}

fn default_cache_size() -> u64 {
    DEFAULT_CACHE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration, defaults included, as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }

    /// Apply CLI overrides to the configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref addr) = overrides.addr {
            self.node.addr = addr.clone();
        }
        if let Some(ref attrs) = overrides.attrs {
            self.node.attrs = attrs.clone();
        }
        if let Some(ref stores) = overrides.stores {
            self.storage.stores = stores.clone();
        }
        if let Some(cache_size) = overrides.cache_size {
            self.storage.cache_size = cache_size;
        }
        if let Some(ref gossip) = overrides.gossip {
            self.gossip.bootstrap = gossip.clone();
        }
        if let Some(ref certs) = overrides.certs {
            self.tls.certs = certs.clone();
        }
        if overrides.linearizable {
            self.node.linearizable = true;
        }
        if let Some(ref log_level) = overrides.log_level {
            self.telemetry.log_level = log_level.clone();
        }
    }

    /// Validate configuration consistency.
    ///
    /// Store and gossip strings are checked later by [`Context::init`].
    pub fn validate(&self) -> Result<()> {
        self.validate_node()?;
        self.validate_storage()?;
        self.validate_gossip()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_node(&self) -> Result<()> {
        if self.node.addr.is_empty() {
            anyhow::bail!("node.addr must not be empty");
        }
        if self.node.max_offset_ms == 0 {
            anyhow::bail!("node.max_offset_ms must be > 0");
        }
        if self.node.scan_interval_ms == 0 {
            anyhow::bail!("node.scan_interval_ms must be > 0");
        }
        Ok(())
    }

    fn validate_storage(&self) -> Result<()> {
        if self.storage.cache_size == 0 {
            anyhow::bail!("storage.cache_size must be > 0");
        }
        Ok(())
    }

    fn validate_gossip(&self) -> Result<()> {
        if self.gossip.interval_ms == 0 {
            anyhow::bail!("gossip.interval_ms must be > 0");
        }
        Ok(())
    }

    fn validate_telemetry(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "telemetry.log_level must be one of {:?}, got: {}",
                LOG_LEVELS,
                self.telemetry.log_level
            );
        }
        Ok(())
    }

    /// Build an uninitialized [`Context`] from this configuration.
    pub fn to_context(&self) -> Context {
        let mut ctx = Context::new();
        ctx.addr = self.node.addr.clone();
        ctx.attrs = self.node.attrs.clone();
        ctx.linearizable = self.node.linearizable;
        ctx.max_offset = Duration::from_millis(self.node.max_offset_ms);
        ctx.scan_interval = Duration::from_millis(self.node.scan_interval_ms);
        ctx.stores = self.storage.stores.clone();
        ctx.cache_size = self.storage.cache_size;
        ctx.gossip_bootstrap = self.gossip.bootstrap.clone();
        ctx.gossip_interval = Duration::from_millis(self.gossip.interval_ms);
        ctx.certs = PathBuf::from(&self.tls.certs);
        ctx
    }
}

/// CLI override options that can be applied to configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override bind address.
    pub addr: Option<String>,
    /// Override node attributes.
    pub attrs: Option<String>,
    /// Override store specification.
    pub stores: Option<String>,
    /// Override cache size.
    pub cache_size: Option<u64>,
    /// Override gossip bootstrap list.
    pub gossip: Option<String>,
    /// Override certificate directory.
    pub certs: Option<String>,
    /// Force linearizable mode on.
    pub linearizable: bool,
    /// Override log level.
    pub log_level: Option<String>,
}
