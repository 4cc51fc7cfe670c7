//! # flt — Fleet CLI
//!
//! Operator control surface for a set of independently deployable
//! services, unified across local processes, a docker-compose group,
//! and a Kubernetes cluster.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Usage problems exit 1 per the command contract; help and version
    // remain exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };
    commands::execute(cli)
}
