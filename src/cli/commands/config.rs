//! Config command implementation.

use super::start::DEFAULT_CONFIG_PATH;
use crate::core::config::Config;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Configuration operations.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration file given by `--config`.
    Validate,
    /// Print the configuration file given by `--config`, with defaults.
    Show {
        /// Output format (toml, json).
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Generate a configuration template.
    Generate {
        /// Output file path.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Environment (dev, prod).
        #[arg(long, default_value = "dev")]
        env: String,
    },
}

/// Run the config command against `config_path` (default `cairn.toml`).
pub fn run_config(config_path: Option<&Path>, args: ConfigArgs) -> Result<()> {
    let config = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    match args.command {
        ConfigCommand::Validate => validate_config(config),
        ConfigCommand::Show { format } => show_config(config, &format),
        ConfigCommand::Generate { output, env } => generate_config(output.as_deref(), &env),
    }
}

fn validate_config(path: &Path) -> Result<()> {
    let config = Config::from_file(path)?;
    println!("✓ Config file is valid");

    for warning in config_warnings(&config) {
        println!("  ⚠ Warning: {}", warning);
    }
    Ok(())
}

/// Settings that pass validation but will fail `Context::init` unless given
/// on the command line.
fn config_warnings(config: &Config) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if config.storage.stores.is_empty() {
        warnings.push("storage.stores not set (pass --stores)");
    }
    if config.gossip.bootstrap.is_empty() {
        warnings.push("gossip.bootstrap not set (pass --gossip)");
    }
    warnings
}

fn show_config(path: &Path, format: &str) -> Result<()> {
    let config = Config::from_file(path)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&config)?),
        "toml" => print!("{}", config.to_toml()?),
        other => anyhow::bail!("unknown format {:?} (expected toml or json)", other),
    }
    Ok(())
}

fn generate_config(output: Option<&Path>, env: &str) -> Result<()> {
    let template = match env {
        "prod" | "production" => PROD_TEMPLATE,
        _ => DEV_TEMPLATE,
    };

    match output {
        Some(path) => {
            std::fs::write(path, template)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Generated {} config template: {:?}", env, path);
        }
        None => println!("{}", template),
    }
    Ok(())
}

const DEV_TEMPLATE: &str = r#"# Cairn Development Configuration

[node]
addr = ":26257"
attrs = "dev"

[storage]
stores = "mem=1073741824"

[gossip]
bootstrap = "self://"

[telemetry]
log_level = "debug"
"#;

const PROD_TEMPLATE: &str = r#"# Cairn Production Configuration

[node]
addr = ":26257"
attrs = "us-east:ssd"
linearizable = true
max_offset_ms = 250
scan_interval_ms = 600000

[storage]
stores = "ssd=/var/lib/cairn/ssd01,hdd:7200rpm=/var/lib/cairn/hda1"
cache_size = 4294967296

[gossip]
bootstrap = "self://,lb=gossip.internal:26257"
interval_ms = 2000

[tls]
certs = "/etc/cairn/certs"

[telemetry]
log_level = "info"
"#;
