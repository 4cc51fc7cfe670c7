//! `flt debug` — Composite snapshot of one or all services.

use clap::Args;
use fleet_common::constants::services_dir;

use crate::output;

/// Arguments for the `debug` command.
#[derive(Args, Debug)]
pub struct DebugArgs {
    /// Limit to one service.
    #[arg(long)]
    pub service: Option<String>,

    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,
}

/// Executes the `debug` command.
///
/// Per service: health, recent logs, and backend metadata. Missing
/// sub-results render as "not found" rather than failing the call.
///
/// # Errors
///
/// Returns an error if discovery fails or the named service is unknown.
pub fn execute(args: DebugArgs) -> anyhow::Result<()> {
    let engine = super::engine_for(args.mode);
    let targets = super::resolve_targets(args.service.as_deref())?;
    if targets.is_empty() {
        println!("No services discovered under {}.", services_dir().display());
        return Ok(());
    }

    for (name, result) in engine.fan_out(&targets, |backend, svc| Ok(backend.describe(svc))) {
        match result {
            Ok(report) => println!("{}", output::describe_block(&name, &report)),
            Err(e) => println!("=== {} ===\nerror: {e}\n", name.as_str()),
        }
    }
    Ok(())
}
