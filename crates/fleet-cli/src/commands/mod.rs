//! CLI command definitions and dispatch.

pub mod debug;
pub mod health;
pub mod logs;
pub mod monitor;
pub mod restart;
pub mod scale;
pub mod status;
pub mod stop;
pub mod test;

use clap::{Parser, Subcommand, ValueEnum};
use fleet_common::constants::services_dir;
use fleet_common::error::Result as FleetResult;
use fleet_common::types::{ExecutionMode, Service};
use fleet_runtime::detect;
use fleet_runtime::engine::Engine;

/// Fleet — operator control surface for the service set.
#[derive(Parser, Debug)]
#[command(name = "flt", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show per-service status in the active environment.
    Status(status::StatusArgs),
    /// Run one health check per service.
    Health(health::HealthArgs),
    /// View a service's logs (bounded tail or follow).
    Logs(logs::LogsArgs),
    /// Stop one service, or all of them.
    Stop(stop::StopArgs),
    /// Restart one service, or all of them.
    Restart(restart::RestartArgs),
    /// Adjust a service's replica count.
    Scale(scale::ScaleArgs),
    /// Composite snapshot: health, recent logs, backend detail.
    Debug(debug::DebugArgs),
    /// Smoke-test the services over the HTTP convention.
    Test(test::TestArgs),
    /// Continuously refresh status and health until interrupted.
    Monitor(monitor::MonitorArgs),
}

/// Execution environment override accepted on every subcommand.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    /// Locally-run processes.
    Local,
    /// Docker-compose container group.
    Docker,
    /// Kubernetes cluster.
    K8s,
}

impl From<ModeArg> for ExecutionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Local => Self::Local,
            ModeArg::Docker => Self::Compose,
            ModeArg::K8s => Self::Cluster,
        }
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Status(args) => status::execute(args),
        Command::Health(args) => health::execute(args),
        Command::Logs(args) => logs::execute(args),
        Command::Stop(args) => stop::execute(args),
        Command::Restart(args) => restart::execute(args),
        Command::Scale(args) => scale::execute(args),
        Command::Debug(args) => debug::execute(args),
        Command::Test(args) => test::execute(args),
        Command::Monitor(args) => monitor::execute(args),
    }
}

/// Builds the engine for one invocation: mode resolved exactly once,
/// adapter selected exactly once.
pub(crate) fn engine_for(mode: Option<ModeArg>) -> Engine {
    Engine::for_mode(detect::resolve(mode.map(Into::into)))
}

/// Discovers the full service set under the conventional root.
pub(crate) fn discover_all() -> FleetResult<Vec<Service>> {
    fleet_discovery::discover(&services_dir())
}

/// Resolves the services a command applies to: the named one, or every
/// discovered one in discovery order.
pub(crate) fn resolve_targets(service: Option<&str>) -> FleetResult<Vec<Service>> {
    let services = discover_all()?;
    match service {
        Some(name) => Ok(vec![
            fleet_discovery::registry::find(&services, name)?.clone(),
        ]),
        None => Ok(services),
    }
}
