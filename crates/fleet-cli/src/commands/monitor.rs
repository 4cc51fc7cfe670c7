//! `flt monitor` — Continuously refresh status until interrupted.

use std::io::Write;
use std::sync::atomic::Ordering;

use clap::Args;
use fleet_common::constants::services_dir;
use fleet_common::error::FleetError;
use fleet_runtime::monitor::Monitor;

use crate::output;

/// Arguments for the `monitor` command.
#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,
}

/// Executes the `monitor` command.
///
/// Renders a fresh status-and-health pass every five seconds until
/// Ctrl-C. Each frame rediscovers the service set and recomputes every
/// outcome; nothing is cached between frames.
///
/// # Errors
///
/// Returns an error if the interrupt handler cannot be installed or a
/// frame's backend pass fails.
pub fn execute(args: MonitorArgs) -> anyhow::Result<()> {
    let engine = super::engine_for(args.mode);
    let monitor = Monitor::new();

    let stop = monitor.stop_flag();
    ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    monitor.run(&mut out, |out| {
        let services = super::discover_all()?;
        let io = |e: std::io::Error| FleetError::Io {
            path: "stdout".into(),
            source: e,
        };

        // Clear screen and home the cursor before each frame.
        write!(out, "\x1b[2J\x1b[H").map_err(io)?;
        writeln!(
            out,
            "Fleet monitor | mode {} | {}  (Ctrl-C to exit)",
            engine.mode(),
            chrono::Local::now().format("%H:%M:%S"),
        )
        .map_err(io)?;

        if services.is_empty() {
            writeln!(out, "No services discovered under {}.", services_dir().display())
                .map_err(io)?;
        }
        for (name, result) in engine.fan_out(&services, |backend, svc| Ok(backend.status(svc))) {
            match result {
                Ok(report) => {
                    writeln!(out, "{}", output::status_line(&name, &report)).map_err(io)?;
                }
                Err(e) => writeln!(out, "{:<28} error: {e}", name.as_str()).map_err(io)?,
            }
        }
        out.flush().map_err(io)
    })?;

    Ok(())
}
