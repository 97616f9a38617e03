//! Check command implementation.
//!
//! Runs the same bootstrap as `start`, prints what was built, and exits.

use super::start::{init_tracing, load_config, NodeArgs};
use crate::core::context::Context;
use anyhow::{Context as _, Result};
use clap::Args;
use std::fmt::Write as _;
use std::path::Path;

/// Initialize the node and print a summary.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run the check command.
pub fn run_check(
    config_path: Option<&Path>,
    log_level: Option<&str>,
    args: CheckArgs,
) -> Result<()> {
    let config = load_config(config_path, &args.node.overrides(log_level))?;
    init_tracing(&config.telemetry.log_level);

    let mut ctx = config.to_context();
    ctx.init().context("node initialization failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary_json(&ctx))?);
    } else {
        print!("{}", summary_text(&ctx));
    }
    Ok(())
}

fn summary_json(ctx: &Context) -> serde_json::Value {
    let engines: Vec<_> = ctx
        .engines()
        .iter()
        .map(|engine| {
            serde_json::json!({
                "kind": engine.kind().to_string(),
                "attrs": engine.attrs().as_slice(),
            })
        })
        .collect();
    let resolvers: Vec<_> = ctx
        .gossip_bootstrap_resolvers()
        .iter()
        .map(|resolver| resolver.to_string())
        .collect();

    serde_json::json!({
        "addr": ctx.addr,
        "engines": engines,
        "attrs": ctx.node_attributes().as_slice(),
        "resolvers": resolvers,
        "linearizable": ctx.linearizable,
    })
}

fn summary_text(ctx: &Context) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Node {}", ctx.addr);
    let _ = writeln!(out, "  Engines ({}):", ctx.engines().len());
    for engine in ctx.engines() {
        let _ = writeln!(out, "    {} [{}]", engine.kind(), engine.attrs());
    }
    let _ = writeln!(out, "  Attributes: [{}]", ctx.node_attributes());
    let _ = writeln!(
        out,
        "  Gossip resolvers ({}):",
        ctx.gossip_bootstrap_resolvers().len()
    );
    for resolver in ctx.gossip_bootstrap_resolvers() {
        let _ = writeln!(out, "    {}", resolver);
    }
    let _ = writeln!(out, "  Linearizable: {}", ctx.linearizable);
    out
}
