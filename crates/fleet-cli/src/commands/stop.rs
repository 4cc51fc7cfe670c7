//! `flt stop` — Stop one service, or all of them.

use clap::Args;

/// Arguments for the `stop` command.
#[derive(Args, Debug)]
pub struct StopArgs {
    /// Service to stop. When omitted, stops every service.
    ///
    /// Stopping all in local mode matches processes by a coarse
    /// command-line pattern and may catch unrelated processes whose
    /// command line happens to match.
    #[arg(long)]
    pub service: Option<String>,

    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,
}

/// Executes the `stop` command.
///
/// # Errors
///
/// Returns an error if the backend call fails.
pub fn execute(args: StopArgs) -> anyhow::Result<()> {
    let engine = super::engine_for(args.mode);

    match args.service {
        Some(name) => {
            let targets = super::resolve_targets(Some(&name))?;
            engine.backend().stop(&targets[0])?;
            println!("Stopped {name}.");
        }
        None => {
            let services = super::discover_all()?;
            engine.backend().stop_all(&services)?;
            println!("Stopped all services ({} mode).", engine.mode());
        }
    }
    Ok(())
}
