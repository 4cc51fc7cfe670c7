//! `flt restart` — Restart one service, or all of them.

use clap::Args;
use fleet_common::constants::services_dir;

/// Arguments for the `restart` command.
#[derive(Args, Debug)]
pub struct RestartArgs {
    /// Service to restart. When omitted, restarts every service.
    #[arg(long)]
    pub service: Option<String>,

    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,
}

/// Executes the `restart` command.
///
/// A targeted restart surfaces its failure directly; a fan-out reports
/// every service independently and still exits 0.
///
/// # Errors
///
/// Returns an error for a failed targeted restart, or if discovery
/// fails.
pub fn execute(args: RestartArgs) -> anyhow::Result<()> {
    let engine = super::engine_for(args.mode);

    if let Some(name) = args.service {
        let targets = super::resolve_targets(Some(&name))?;
        engine.backend().restart(&targets[0])?;
        println!("Restarted {name}.");
        return Ok(());
    }

    let services = super::discover_all()?;
    if services.is_empty() {
        println!("No services discovered under {}.", services_dir().display());
        return Ok(());
    }
    for (name, result) in engine.fan_out(&services, |backend, svc| backend.restart(svc)) {
        match result {
            Ok(()) => println!("{:<28} restarted", name.as_str()),
            Err(e) => println!("{:<28} error: {e}", name.as_str()),
        }
    }
    Ok(())
}
