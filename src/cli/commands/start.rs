//! Start command implementation.

use crate::core::config::{Config, ConfigOverrides};
use crate::core::runtime::Runtime;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "cairn.toml";

/// Node flags shared by `start` and `check`.
#[derive(Args, Debug, Default, Clone)]
pub struct NodeArgs {
    /// host:port to bind for HTTP/RPC traffic.
    #[arg(long)]
    pub addr: Option<String>,

    /// Store specification, e.g. `ssd=/mnt/ssd01,mem=1073741824`.
    #[arg(long)]
    pub stores: Option<String>,

    /// Colon-separated node attributes.
    #[arg(long)]
    pub attrs: Option<String>,

    /// Comma-separated gossip bootstrap resolvers.
    #[arg(long)]
    pub gossip: Option<String>,

    /// Certificate directory.
    #[arg(long)]
    pub certs: Option<String>,

    /// Cache budget in bytes shared by disk-backed stores.
    #[arg(long)]
    pub cache_size: Option<u64>,

    /// Enable linearizable commit timestamps.
    #[arg(long)]
    pub linearizable: bool,
}

impl NodeArgs {
    /// Convert flags into config overrides.
    pub fn overrides(&self, log_level: Option<&str>) -> ConfigOverrides {
        ConfigOverrides {
            addr: self.addr.clone(),
            attrs: self.attrs.clone(),
            stores: self.stores.clone(),
            cache_size: self.cache_size,
            gossip: self.gossip.clone(),
            certs: self.certs.clone(),
            linearizable: self.linearizable,
            log_level: log_level.map(str::to_string),
        }
    }
}

/// Start the node.
#[derive(Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub node: NodeArgs,
}

/// Load the config file (explicit path, else `cairn.toml` if present, else
/// defaults), apply overrides and validate.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                Config::from_file(&default_path)
                    .with_context(|| format!("failed to load config from {:?}", default_path))?
            } else {
                Config::default()
            }
        }
    };

    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}

/// Initialize tracing subscriber if the telemetry feature is enabled.
#[cfg(feature = "telemetry")]
pub(crate) fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();
}

#[cfg(not(feature = "telemetry"))]
pub(crate) fn init_tracing(_level: &str) {}

/// Run the start command.
pub async fn run_start(
    config_path: Option<&Path>,
    log_level: Option<&str>,
    args: StartArgs,
) -> Result<()> {
    let config = load_config(config_path, &args.node.overrides(log_level))?;
    init_tracing(&config.telemetry.log_level);

    let mut runtime = Runtime::new(&config)?;
    runtime.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[storage]\nstores = \"mem=1024\"\n[gossip]\nbootstrap = \"self://\""
        )
        .unwrap();

        let args = NodeArgs {
            stores: Some("mem=2048".to_string()),
            linearizable: true,
            ..Default::default()
        };
        let config = load_config(Some(file.path()), &args.overrides(Some("debug"))).unwrap();

        assert_eq!(config.storage.stores, "mem=2048");
        assert_eq!(config.gossip.bootstrap, "self://");
        assert!(config.node.linearizable);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_config(Some(file.path()), &NodeArgs::default().overrides(Some("loud")))
            .unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.toml");
        let err = load_config(Some(&path), &ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}
