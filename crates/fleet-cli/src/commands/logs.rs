//! `flt logs` — View a service's logs.

use clap::Args;
use fleet_common::constants::LOG_TAIL_LINES;
use fleet_common::error::FleetError;

/// Arguments for the `logs` command.
#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Service whose logs to view (required).
    #[arg(long)]
    pub service: Option<String>,

    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,

    /// Follow log output until interrupted.
    #[arg(short, long)]
    pub follow: bool,
}

/// Executes the `logs` command.
///
/// Without `--follow`, prints a bounded tail and returns. With it,
/// streams until externally interrupted; line ordering is whatever the
/// backend emits.
///
/// # Errors
///
/// Returns a usage error when `--service` is omitted, and a backend
/// error when the log source cannot be read.
pub fn execute(args: LogsArgs) -> anyhow::Result<()> {
    let name = args.service.ok_or_else(|| FleetError::Usage {
        message: "logs requires --service".into(),
    })?;
    let engine = super::engine_for(args.mode);
    let targets = super::resolve_targets(Some(&name))?;
    let service = &targets[0];

    if args.follow {
        engine.backend().log_follow(service)?;
    } else {
        let tail = engine.backend().log_tail(service, LOG_TAIL_LINES)?;
        if tail.is_empty() {
            println!("No logs available for {name}.");
        } else {
            print!("{tail}");
        }
    }
    Ok(())
}
