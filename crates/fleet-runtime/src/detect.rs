//! Execution environment detection.
//!
//! Probes the host for an active cluster context, then an active
//! compose group, and falls back to local processes. Every probe
//! failure (tool not installed, daemon unreachable, nonzero exit) is a
//! negative signal, never an error: detection always yields a mode.

use fleet_common::types::ExecutionMode;

use crate::exec;

/// Resolves the execution mode for one invocation.
///
/// An explicit override always wins and skips probing entirely. The
/// result is resolved once per command execution; nothing re-probes
/// mid-command.
#[must_use]
pub fn resolve(override_mode: Option<ExecutionMode>) -> ExecutionMode {
    override_mode.map_or_else(detect, |mode| {
        tracing::debug!(%mode, "mode overridden, skipping detection");
        mode
    })
}

/// Probes the host and returns the default execution mode.
///
/// Cluster presence is checked before the compose group: an
/// orchestrated deployment is the more authoritative environment.
#[must_use]
pub fn detect() -> ExecutionMode {
    if cluster_active() {
        tracing::debug!("detected active cluster context");
        return ExecutionMode::Cluster;
    }
    if compose_active() {
        tracing::debug!("detected running compose group");
        return ExecutionMode::Compose;
    }
    ExecutionMode::Local
}

/// Whether a reachable cluster with at least one workload exists.
fn cluster_active() -> bool {
    if !exec::tool_available("kubectl") {
        return false;
    }
    exec::run_capture("kubectl", ["get", "deployments", "-o", "name"])
        .map(|out| out.success() && has_any_entry(&out.stdout))
        .unwrap_or(false)
}

/// Whether the compose group reports at least one running container.
fn compose_active() -> bool {
    if !exec::tool_available("docker") {
        return false;
    }
    exec::run_capture("docker", ["compose", "ps", "--status", "running", "--quiet"])
        .map(|out| out.success() && has_any_entry(&out.stdout))
        .unwrap_or(false)
}

/// Whether probe output lists at least one non-blank entry.
fn has_any_entry(stdout: &str) -> bool {
    stdout.lines().any(|line| !line.trim().is_empty())
}
