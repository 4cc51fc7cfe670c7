//! `flt health` — Run one health check per service.

use clap::Args;
use fleet_common::constants::services_dir;

use crate::output;

/// Arguments for the `health` command.
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Limit to one service.
    #[arg(long)]
    pub service: Option<String>,

    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,
}

/// Executes the `health` command.
///
/// Each service yields exactly one of reachable / unreachable /
/// unknown; outcomes are recomputed fresh, never cached.
///
/// # Errors
///
/// Returns an error if discovery fails or the named service is unknown.
pub fn execute(args: HealthArgs) -> anyhow::Result<()> {
    let engine = super::engine_for(args.mode);
    let targets = super::resolve_targets(args.service.as_deref())?;
    if targets.is_empty() {
        println!("No services discovered under {}.", services_dir().display());
        return Ok(());
    }

    for (name, result) in engine.fan_out(&targets, |backend, svc| Ok(backend.health(svc))) {
        match result {
            Ok(outcome) => println!("{}", output::health_line(&name, &outcome)),
            Err(e) => println!("{:<28} error: {e}", name.as_str()),
        }
    }
    Ok(())
}
