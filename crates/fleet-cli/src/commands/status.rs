//! `flt status` — Show per-service status in the active environment.

use clap::Args;
use fleet_common::constants::services_dir;

use crate::output;

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Limit to one service.
    #[arg(long)]
    pub service: Option<String>,

    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,
}

/// Executes the `status` command.
///
/// Emits exactly one line per affected service; a failure on one never
/// suppresses the others.
///
/// # Errors
///
/// Returns an error if discovery fails or the named service is unknown.
pub fn execute(args: StatusArgs) -> anyhow::Result<()> {
    let engine = super::engine_for(args.mode);
    let targets = super::resolve_targets(args.service.as_deref())?;
    if targets.is_empty() {
        println!("No services discovered under {}.", services_dir().display());
        return Ok(());
    }

    println!("Execution mode: {}", engine.mode());
    for (name, result) in engine.fan_out(&targets, |backend, svc| Ok(backend.status(svc))) {
        match result {
            Ok(report) => println!("{}", output::status_line(&name, &report)),
            Err(e) => println!("{:<28} error: {e}", name.as_str()),
        }
    }
    Ok(())
}
