//! Local-process backend.
//!
//! Services run as plain host processes. Addressing comes from the
//! declared `.env` port; liveness is a timed HTTP probe against the
//! health path; logs live in the conventional per-service file; stop
//! matches processes by a command-line pattern derived from the
//! service identity.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use fleet_common::constants::LOG_TAIL_LINES;
use fleet_common::error::{FleetError, Result};
use fleet_common::types::{ExecutionMode, HealthOutcome, ScaleOutcome, Service, StatusReport};

use super::ServiceBackend;
use crate::{exec, probe};

/// Command-line pattern used by stop-all.
///
/// Deliberately coarse: any process whose command line matches
/// `python.*app.py` is stopped, including ones unrelated to this
/// system. Known imprecision, kept as-is.
const ALL_PROCESSES_PATTERN: &str = "python.*app.py";

/// Adapter for locally-run service processes.
pub struct LocalBackend;

impl LocalBackend {
    /// Creates the local adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Conventional log file for a local service: `<dir>/logs/<name>.log`.
#[must_use]
pub fn log_path(service: &Service) -> PathBuf {
    service
        .dir
        .join("logs")
        .join(format!("{}.log", service.name))
}

/// Command-line pattern matching one service's process.
#[must_use]
pub fn process_pattern(service: &Service) -> String {
    format!("python.*{}", service.name)
}

/// Returns the last `lines` lines of `content`.
#[must_use]
pub fn tail_lines(content: &str, lines: usize) -> String {
    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

impl ServiceBackend for LocalBackend {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Local
    }

    fn status(&self, service: &Service) -> StatusReport {
        let health = self.health(service);
        let detail = service
            .port
            .map_or_else(|| "no declared port".to_string(), |p| format!("port {p}"));
        StatusReport { health, detail }
    }

    fn health(&self, service: &Service) -> HealthOutcome {
        match service.health_url() {
            Some(url) => {
                if probe::http_ok(&url) {
                    HealthOutcome::Reachable
                } else {
                    HealthOutcome::Unreachable
                }
            }
            None => HealthOutcome::Unknown("no PORT declared in .env".into()),
        }
    }

    fn log_tail(&self, service: &Service, lines: usize) -> Result<String> {
        let path = log_path(service);
        if !path.exists() {
            return Ok(String::new());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| FleetError::Io {
            path,
            source: e,
        })?;
        Ok(tail_lines(&content, lines))
    }

    fn log_follow(&self, service: &Service) -> Result<()> {
        let path = log_path(service);
        if !path.exists() {
            return Err(FleetError::NotFound {
                kind: "log file",
                id: path.display().to_string(),
            });
        }
        // Blocks until the operator interrupts.
        let path_arg = path.display().to_string();
        let depth = LOG_TAIL_LINES.to_string();
        let _ = exec::run_streaming("tail", ["-n", depth.as_str(), "-f", path_arg.as_str()])?;
        Ok(())
    }

    fn stop(&self, service: &Service) -> Result<()> {
        let pattern = process_pattern(service);
        tracing::info!(service = %service.name, %pattern, "stopping local process");
        let out = exec::run_capture("pkill", ["-f", pattern.as_str()])?;
        // pkill exits 1 when nothing matched; that is not a failure.
        if out.exit_code > 1 {
            return Err(FleetError::Backend {
                message: format!("pkill failed for {}: {}", service.name, out.stderr.trim()),
            });
        }
        if out.exit_code == 1 {
            tracing::info!(service = %service.name, "no matching process");
        }
        Ok(())
    }

    fn stop_all(&self, _services: &[Service]) -> Result<()> {
        tracing::info!(pattern = ALL_PROCESSES_PATTERN, "stopping all local services");
        let out = exec::run_capture("pkill", ["-f", ALL_PROCESSES_PATTERN])?;
        if out.exit_code > 1 {
            return Err(FleetError::Backend {
                message: format!("pkill failed: {}", out.stderr.trim()),
            });
        }
        Ok(())
    }

    fn restart(&self, service: &Service) -> Result<()> {
        self.stop(service)?;

        let log = log_path(service);
        if let Some(parent) = log.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FleetError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let stdout = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log)
            .map_err(|e| FleetError::Io {
                path: log.clone(),
                source: e,
            })?;
        let stderr = stdout.try_clone().map_err(|e| FleetError::Io {
            path: log.clone(),
            source: e,
        })?;

        let mut cmd = Command::new("python");
        let _ = cmd
            .arg("app.py")
            .current_dir(&service.dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr);
        if let Some(port) = service.port {
            let _ = cmd.env("PORT", port.to_string());
        }
        let child = cmd.spawn().map_err(|e| FleetError::Io {
            path: service.dir.clone(),
            source: e,
        })?;
        tracing::info!(service = %service.name, pid = child.id(), "restarted local process");
        Ok(())
    }

    fn scale(&self, service: &Service, _replicas: u32) -> Result<ScaleOutcome> {
        // Explicitly declined; no state-changing call is made.
        Ok(ScaleOutcome::Unsupported {
            reason: format!(
                "{} runs as a single local process; scaling requires docker or k8s mode",
                service.name
            ),
        })
    }

    fn detail(&self, service: &Service) -> Option<String> {
        let pattern = process_pattern(service);
        let out = exec::run_capture("pgrep", ["-fl", pattern.as_str()]).ok()?;
        if out.success() && !out.stdout.trim().is_empty() {
            Some(out.stdout.trim_end().to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use fleet_common::types::ServiceName;

    use super::*;

    fn service_with_port(dir: &std::path::Path, port: Option<u16>) -> Service {
        Service {
            name: ServiceName::new("user_service"),
            dir: dir.to_path_buf(),
            port,
        }
    }

    #[test]
    fn health_without_port_is_unknown() {
        let svc = service_with_port(std::path::Path::new("services/user_service"), None);
        let outcome = LocalBackend::new().health(&svc);
        assert!(matches!(outcome, HealthOutcome::Unknown(_)));
    }

    #[test]
    fn declared_port_with_no_listener_is_unreachable() {
        // Port 9001 declared, nobody listening: health must come back
        // Unreachable and status must still carry the declared port.
        let svc = service_with_port(std::path::Path::new("services/user_service"), Some(9001));
        let backend = LocalBackend::new();

        assert_eq!(backend.health(&svc), HealthOutcome::Unreachable);
        let report = backend.status(&svc);
        assert_eq!(report.health, HealthOutcome::Unreachable);
        assert_eq!(report.detail, "port 9001");
    }

    #[test]
    fn scale_is_declined_without_side_effects() {
        let svc = service_with_port(std::path::Path::new("services/user_service"), Some(9001));
        let outcome = LocalBackend::new().scale(&svc, 3).expect("scale");
        assert!(matches!(outcome, ScaleOutcome::Unsupported { .. }));
    }

    #[test]
    fn log_tail_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service_with_port(dir.path(), Some(9001));
        let tail = LocalBackend::new().log_tail(&svc, 10).expect("tail");
        assert!(tail.is_empty());
    }

    #[test]
    fn log_tail_is_bounded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service_with_port(dir.path(), Some(9001));
        let path = log_path(&svc);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("logs dir");
        let content: String = (1..=100).map(|i| format!("line {i}\n")).collect();
        std::fs::write(&path, content).expect("write log");

        let tail = LocalBackend::new().log_tail(&svc, 10).expect("tail");
        assert_eq!(tail.lines().count(), 10);
        assert!(tail.starts_with("line 91"));
        assert!(tail.ends_with("line 100"));
    }

    #[test]
    fn tail_lines_shorter_input_is_returned_whole() {
        assert_eq!(tail_lines("a\nb", 10), "a\nb");
    }

    #[test]
    fn stop_all_pattern_matches_any_entry_process() {
        assert_eq!(ALL_PROCESSES_PATTERN, "python.*app.py");
    }

    #[test]
    fn process_pattern_embeds_the_service_name() {
        let svc = service_with_port(std::path::Path::new("services/user_service"), None);
        assert_eq!(process_pattern(&svc), "python.*user_service");
    }

    #[test]
    fn log_path_follows_the_convention() {
        let svc = service_with_port(std::path::Path::new("services/user_service"), None);
        assert_eq!(
            log_path(&svc),
            PathBuf::from("services/user_service/logs/user_service.log")
        );
    }

    #[test]
    fn describe_reports_missing_fields_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let svc = service_with_port(dir.path(), Some(9001));
        let report = LocalBackend::new().describe(&svc);
        assert_eq!(report.health, HealthOutcome::Unreachable);
        assert!(report.log_tail.is_none());
    }
}
