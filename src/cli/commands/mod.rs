//! CLI command implementations.

mod check;
mod config;
mod start;

pub use check::{run_check, CheckArgs};
pub use config::{run_config, ConfigArgs};
pub use start::{load_config, run_start, NodeArgs, StartArgs};
