//! Cairn - unified CLI entrypoint.
//!
//! Usage:
//!   cairn start --config cairn.toml
//!   cairn start --stores mem=1073741824 --gossip self://
//!   cairn check --config cairn.toml [--json]
//!   cairn config validate --config cairn.toml
//!   cairn config generate --env prod -o cairn.toml

use anyhow::Result;
use cairn::cli::commands::{run_check, run_config, run_start};
use cairn::cli::{Cli, Commands};
use clap::Parser;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.map(PathBuf::from);
    let log_level = cli.log_level.as_deref();

    match cli.command {
        Commands::Start(args) => run_start(config_path.as_deref(), log_level, args).await,
        Commands::Check(args) => run_check(config_path.as_deref(), log_level, args),
        Commands::Config(args) => run_config(config_path.as_deref(), args),
    }
}
