//! Command-line interface.
//!
//! Unified CLI for Cairn node operations.

pub mod commands;

use clap::{Parser, Subcommand};

/// Cairn - node bootstrap for a distributed key-value store.
#[derive(Parser, Debug)]
#[command(name = "cairn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the node and run until interrupted.
    Start(commands::StartArgs),
    /// Initialize the node, print what was built, and exit.
    Check(commands::CheckArgs),
    /// Configuration operations.
    Config(commands::ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_start_flags() {
        let cli = Cli::parse_from([
            "cairn",
            "--log-level",
            "debug",
            "start",
            "--stores",
            "mem=1024",
            "--gossip",
            "self://",
            "--linearizable",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Start(args) => {
                assert_eq!(args.node.stores.as_deref(), Some("mem=1024"));
                assert!(args.node.linearizable);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["cairn", "config", "validate", "--config", "node.toml"]);
        assert_eq!(cli.config.as_deref(), Some("node.toml"));
    }
}
