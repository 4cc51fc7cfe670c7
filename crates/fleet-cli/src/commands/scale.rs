//! `flt scale` — Adjust a service's replica count.

use clap::Args;
use fleet_common::error::FleetError;
use fleet_common::types::ScaleOutcome;

/// Arguments for the `scale` command.
#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Service to scale (required).
    #[arg(long)]
    pub service: Option<String>,

    /// Desired replica count (required).
    #[arg(long)]
    pub replicas: Option<u32>,

    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,
}

/// Executes the `scale` command.
///
/// Cluster mode blocks until the rollout is stable; docker mode issues
/// the scale and returns immediately; local mode is declined with a
/// warning and exit 0, since a declined scale is not a failure. No
/// replica count is tracked afterward.
///
/// # Errors
///
/// Returns a usage error when `--service` or `--replicas` is omitted,
/// and a backend error when an accepted scale call fails.
pub fn execute(args: ScaleArgs) -> anyhow::Result<()> {
    let name = args.service.ok_or_else(|| FleetError::Usage {
        message: "scale requires --service".into(),
    })?;
    let replicas = args.replicas.ok_or_else(|| FleetError::Usage {
        message: "scale requires --replicas".into(),
    })?;

    let engine = super::engine_for(args.mode);
    let targets = super::resolve_targets(Some(&name))?;

    match engine.backend().scale(&targets[0], replicas)? {
        ScaleOutcome::Applied { replicas } => {
            println!("{name} scaled to {replicas} replica(s).");
        }
        ScaleOutcome::Unsupported { reason } => {
            tracing::warn!(service = %name, "scale rejected by backend");
            println!("warning: scale rejected: {reason}");
        }
    }
    Ok(())
}
