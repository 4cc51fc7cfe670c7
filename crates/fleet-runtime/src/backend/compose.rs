//! Docker-compose backend.
//!
//! A service maps to the compose-managed container of the same name.
//! Health is probed *inside* the container over loopback, decoupling
//! liveness from host networking; logs, stop, restart, and scale map
//! directly to compose primitives.

use fleet_common::constants::{DEFAULT_CONTAINER_PORT, HEALTH_PATH};
use fleet_common::error::{FleetError, Result};
use fleet_common::types::{ExecutionMode, HealthOutcome, ScaleOutcome, Service, StatusReport};
use serde::Deserialize;

use super::ServiceBackend;
use crate::exec;

/// Adapter for a docker-compose container group.
pub struct ComposeBackend;

impl ComposeBackend {
    /// Creates the compose adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn compose<'a>(args: impl IntoIterator<Item = &'a str>) -> Result<exec::ExecOutput> {
        let full: Vec<&str> = std::iter::once("compose").chain(args).collect();
        exec::run_capture("docker", full)
    }
}

impl Default for ComposeBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of `docker compose ps --format json` output.
#[derive(Debug, Deserialize)]
pub struct PsEntry {
    /// Container state (`running`, `exited`, ...).
    #[serde(rename = "State", default)]
    pub state: String,
    /// Human status line (`Up 2 minutes`, ...).
    #[serde(rename = "Status", default)]
    pub status: String,
}

/// Parses the first container entry from `ps --format json` output.
///
/// Compose emits one JSON object per line; a parse failure on one line
/// does not poison the rest.
#[must_use]
pub fn first_ps_entry(stdout: &str) -> Option<PsEntry> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .find_map(|line| serde_json::from_str(line).ok())
}

/// In-container loopback health URL for a service.
#[must_use]
pub fn container_health_url(service: &Service) -> String {
    let port = service.port.unwrap_or(DEFAULT_CONTAINER_PORT);
    format!("http://127.0.0.1:{port}{HEALTH_PATH}")
}

impl ServiceBackend for ComposeBackend {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Compose
    }

    fn status(&self, service: &Service) -> StatusReport {
        let name = service.name.as_str();
        let listed = Self::compose(["ps", "--format", "json", name])
            .ok()
            .filter(exec::ExecOutput::success)
            .and_then(|out| first_ps_entry(&out.stdout));

        match listed {
            Some(entry) => {
                let health = if entry.state == "running" {
                    HealthOutcome::Reachable
                } else {
                    HealthOutcome::Unreachable
                };
                let detail = if entry.status.is_empty() {
                    entry.state
                } else {
                    entry.status
                };
                StatusReport { health, detail }
            }
            None => StatusReport {
                health: HealthOutcome::Unknown("no compose container".into()),
                detail: "not listed by docker compose ps".into(),
            },
        }
    }

    fn health(&self, service: &Service) -> HealthOutcome {
        if !exec::tool_available("docker") {
            return HealthOutcome::Unknown("docker not installed".into());
        }
        let url = container_health_url(service);
        let out = Self::compose(["exec", "-T", service.name.as_str(), "curl", "-sf", &url]);
        match out {
            Ok(out) if out.success() => HealthOutcome::Reachable,
            Ok(_) => HealthOutcome::Unreachable,
            Err(_) => HealthOutcome::Unknown("docker not reachable".into()),
        }
    }

    fn log_tail(&self, service: &Service, lines: usize) -> Result<String> {
        let lines = lines.to_string();
        let out = Self::compose([
            "logs",
            "--no-color",
            "--tail",
            lines.as_str(),
            service.name.as_str(),
        ])?;
        if out.success() {
            Ok(out.stdout)
        } else {
            Err(FleetError::Backend {
                message: format!("compose logs failed: {}", out.stderr.trim()),
            })
        }
    }

    fn log_follow(&self, service: &Service) -> Result<()> {
        // Blocks until the operator interrupts.
        let _ = exec::run_streaming(
            "docker",
            ["compose", "logs", "--follow", service.name.as_str()],
        )?;
        Ok(())
    }

    fn stop(&self, service: &Service) -> Result<()> {
        tracing::info!(service = %service.name, "stopping compose container");
        let out = Self::compose(["stop", service.name.as_str()])?;
        if out.success() {
            Ok(())
        } else {
            Err(FleetError::Backend {
                message: format!("compose stop failed: {}", out.stderr.trim()),
            })
        }
    }

    fn stop_all(&self, _services: &[Service]) -> Result<()> {
        tracing::info!("stopping compose group");
        let out = Self::compose(["stop"])?;
        if out.success() {
            Ok(())
        } else {
            Err(FleetError::Backend {
                message: format!("compose stop failed: {}", out.stderr.trim()),
            })
        }
    }

    fn restart(&self, service: &Service) -> Result<()> {
        tracing::info!(service = %service.name, "restarting compose container");
        let out = Self::compose(["restart", service.name.as_str()])?;
        if out.success() {
            Ok(())
        } else {
            Err(FleetError::Backend {
                message: format!("compose restart failed: {}", out.stderr.trim()),
            })
        }
    }

    fn scale(&self, service: &Service, replicas: u32) -> Result<ScaleOutcome> {
        // Issues the scale and returns immediately; compose offers no
        // stability signal to wait on.
        let spec = format!("{}={replicas}", service.name);
        let out = Self::compose(["up", "-d", "--no-recreate", "--scale", spec.as_str()])?;
        if out.success() {
            Ok(ScaleOutcome::Applied { replicas })
        } else {
            Err(FleetError::Backend {
                message: format!("compose scale failed: {}", out.stderr.trim()),
            })
        }
    }

    fn detail(&self, service: &Service) -> Option<String> {
        let out = Self::compose(["ps", service.name.as_str()]).ok()?;
        if out.success() && out.stdout.lines().count() > 1 {
            Some(out.stdout.trim_end().to_string())
        } else {
            None
        }
    }
}
