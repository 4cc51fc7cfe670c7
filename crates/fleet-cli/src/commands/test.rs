//! `flt test` — Smoke-test the services over the HTTP convention.

use std::path::Path;

use clap::Args;
use fleet_common::constants::{MIGRATION_TOOL, services_dir};
use fleet_common::error::{FleetError, Result as FleetResult};
use fleet_common::types::{ExecutionMode, HealthOutcome, Service};
use fleet_runtime::backend::ServiceBackend;
use fleet_runtime::{exec, probe};

/// Arguments for the `test` command.
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Limit to one service.
    #[arg(long)]
    pub service: Option<String>,

    /// Execution environment override (skips detection).
    #[arg(long, value_enum)]
    pub mode: Option<super::ModeArg>,
}

/// Executes the `test` command.
///
/// When the sibling migration tool is present its `status` subcommand
/// runs first; a failure there aborts the whole invocation, because the
/// schema cannot be assumed consistent afterward. The per-service smoke
/// pass then follows partial-failure semantics: every result reported,
/// exit 0.
///
/// # Errors
///
/// Returns an error on a migration-tool failure or when discovery
/// fails.
pub fn execute(args: TestArgs) -> anyhow::Result<()> {
    migration_gate(Path::new(MIGRATION_TOOL))?;

    let engine = super::engine_for(args.mode);
    let targets = super::resolve_targets(args.service.as_deref())?;
    if targets.is_empty() {
        println!("No services discovered under {}.", services_dir().display());
        return Ok(());
    }

    for (name, result) in engine.fan_out(&targets, |backend, svc| Ok(smoke(backend, svc))) {
        match result {
            Ok(summary) => println!("{:<28} {summary}", name.as_str()),
            Err(e) => println!("{:<28} error: {e}", name.as_str()),
        }
    }
    Ok(())
}

/// Runs the migration collaborator's `status` check when the tool
/// exists. Its failure is the one fatal collaborator case.
fn migration_gate(tool: &Path) -> FleetResult<()> {
    if !tool.exists() {
        return Ok(());
    }
    tracing::info!(tool = %tool.display(), "checking migration status");
    // Hosts ship the interpreter as either name; prefer the bare one.
    let interpreter = if exec::tool_available("python") {
        "python"
    } else {
        "python3"
    };
    let tool_path = tool.display().to_string();
    let out = exec::run_capture(interpreter, [tool_path.as_str(), "status"]).map_err(|_| {
        FleetError::Collaborator {
            message: "migration tool present but no python interpreter is available".into(),
        }
    })?;
    if out.success() {
        Ok(())
    } else {
        Err(FleetError::Collaborator {
            message: format!("migration status check failed: {}", out.stderr.trim()),
        })
    }
}

/// One smoke pass for a service: the health check, plus a root-info
/// probe when the service is locally addressable.
fn smoke(backend: &dyn ServiceBackend, service: &Service) -> String {
    let health = backend.health(service);
    match health {
        HealthOutcome::Reachable => {
            if backend.mode() == ExecutionMode::Local {
                match service.info_url() {
                    Some(url) if probe::http_ok(&url) => "PASS (health ok, info ok)".into(),
                    Some(_) => "FAIL (health ok, info path not answering)".into(),
                    None => "PASS (health ok)".into(),
                }
            } else {
                "PASS (health ok)".into()
            }
        }
        HealthOutcome::Unreachable => "FAIL (unreachable)".into(),
        HealthOutcome::Unknown(reason) => format!("SKIP ({reason})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_migration_tool_is_not_a_failure() {
        assert!(migration_gate(Path::new("/nonexistent/db_manager/cli.py")).is_ok());
    }

    #[test]
    fn failing_migration_tool_aborts_as_collaborator_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tool = dir.path().join("cli.py");
        // Fails under any interpreter; a host with none at all reports
        // the same error variant.
        std::fs::write(&tool, "raise SystemExit(3)\n").expect("write tool");
        let err = migration_gate(&tool).expect_err("nonzero status must abort");
        assert!(matches!(err, FleetError::Collaborator { .. }));
    }
}
