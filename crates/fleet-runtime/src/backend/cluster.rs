//! Kubernetes cluster backend.
//!
//! A service maps to the label selector `app=<name>`. Health is the
//! orchestrator's own Ready condition on the first matching pod; the
//! tie-break is whatever order the listing returns, explicitly not
//! deterministic across calls. Stop-all removes the declarative
//! resources under the known manifests directory.

use fleet_common::constants::k8s_dir;
use fleet_common::error::{FleetError, Result};
use fleet_common::types::{ExecutionMode, HealthOutcome, ScaleOutcome, Service, StatusReport};
use serde::Deserialize;

use super::ServiceBackend;
use crate::exec;

/// Adapter for Kubernetes-orchestrated workloads.
pub struct ClusterBackend;

impl ClusterBackend {
    /// Creates the cluster adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ClusterBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Label selector addressing one service's workload instances.
#[must_use]
pub fn selector(service: &Service) -> String {
    format!("app={}", service.name)
}

#[derive(Debug, Default, Deserialize)]
struct PodList {
    #[serde(default)]
    items: Vec<Pod>,
}

#[derive(Debug, Default, Deserialize)]
struct Pod {
    #[serde(default)]
    status: PodStatus,
}

#[derive(Debug, Default, Deserialize)]
struct PodStatus {
    #[serde(default)]
    phase: String,
    #[serde(default)]
    conditions: Vec<PodCondition>,
}

#[derive(Debug, Deserialize)]
struct PodCondition {
    #[serde(rename = "type")]
    kind: String,
    status: String,
}

/// Derives a health outcome from a `kubectl get pods -o json` listing.
///
/// First matching pod wins; no pods means the check could not be
/// performed, not that the service is down.
#[must_use]
pub fn readiness_from_pods(json: &str) -> HealthOutcome {
    let Ok(list) = serde_json::from_str::<PodList>(json) else {
        return HealthOutcome::Unknown("unparsable pod listing".into());
    };
    let Some(pod) = list.items.first() else {
        return HealthOutcome::Unknown("no pods match selector".into());
    };
    let ready = pod
        .status
        .conditions
        .iter()
        .find(|c| c.kind == "Ready")
        .is_some_and(|c| c.status == "True");
    if ready {
        HealthOutcome::Reachable
    } else {
        HealthOutcome::Unreachable
    }
}

/// Summarizes a pod listing for status display.
#[must_use]
pub fn pods_detail(json: &str) -> String {
    let Ok(list) = serde_json::from_str::<PodList>(json) else {
        return "unparsable pod listing".into();
    };
    match list.items.first() {
        Some(pod) => format!("{} pod(s), first phase {}", list.items.len(), pod.status.phase),
        None => "0 pods".into(),
    }
}

/// Deletes every declarative resource under the manifests directory.
///
/// Scoped to that directory; resources created outside it are
/// untouched. A missing directory is reported before any tool runs.
///
/// # Errors
///
/// Returns `NotFound` when the directory does not exist and `Backend`
/// when the delete itself fails.
pub fn delete_manifests(dir: &std::path::Path) -> Result<()> {
    tracing::info!(dir = %dir.display(), "deleting declarative resources");
    if !dir.exists() {
        return Err(FleetError::NotFound {
            kind: "manifests directory",
            id: dir.display().to_string(),
        });
    }
    let out = exec::run_capture(
        "kubectl",
        [
            "delete",
            "-f",
            dir.display().to_string().as_str(),
            "--ignore-not-found",
        ],
    )?;
    if out.success() {
        Ok(())
    } else {
        Err(FleetError::Backend {
            message: format!("kubectl delete failed: {}", out.stderr.trim()),
        })
    }
}

impl ClusterBackend {
    fn pods_json(service: &Service) -> Result<exec::ExecOutput> {
        exec::run_capture(
            "kubectl",
            ["get", "pods", "-l", selector(service).as_str(), "-o", "json"],
        )
    }
}

impl ServiceBackend for ClusterBackend {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Cluster
    }

    fn status(&self, service: &Service) -> StatusReport {
        match Self::pods_json(service) {
            Ok(out) if out.success() => StatusReport {
                health: readiness_from_pods(&out.stdout),
                detail: pods_detail(&out.stdout),
            },
            Ok(out) => StatusReport {
                health: HealthOutcome::Unknown("cluster not reachable".into()),
                detail: out.stderr.trim().to_string(),
            },
            Err(_) => StatusReport {
                health: HealthOutcome::Unknown("kubectl not installed".into()),
                detail: "kubectl not installed".into(),
            },
        }
    }

    fn health(&self, service: &Service) -> HealthOutcome {
        match Self::pods_json(service) {
            Ok(out) if out.success() => readiness_from_pods(&out.stdout),
            Ok(_) => HealthOutcome::Unknown("cluster not reachable".into()),
            Err(_) => HealthOutcome::Unknown("kubectl not installed".into()),
        }
    }

    fn log_tail(&self, service: &Service, lines: usize) -> Result<String> {
        let tail = format!("--tail={lines}");
        let sel = selector(service);
        let out = exec::run_capture("kubectl", ["logs", "-l", sel.as_str(), tail.as_str()])?;
        if out.success() {
            Ok(out.stdout)
        } else {
            Err(FleetError::Backend {
                message: format!("kubectl logs failed: {}", out.stderr.trim()),
            })
        }
    }

    fn log_follow(&self, service: &Service) -> Result<()> {
        // Blocks until the operator interrupts.
        let sel = selector(service);
        let _ = exec::run_streaming("kubectl", ["logs", "--follow", "-l", sel.as_str()])?;
        Ok(())
    }

    fn stop(&self, service: &Service) -> Result<()> {
        tracing::info!(service = %service.name, "deleting workload resources");
        let out = exec::run_capture(
            "kubectl",
            [
                "delete",
                "deployment,service",
                "-l",
                selector(service).as_str(),
                "--ignore-not-found",
            ],
        )?;
        if out.success() {
            Ok(())
        } else {
            Err(FleetError::Backend {
                message: format!("kubectl delete failed: {}", out.stderr.trim()),
            })
        }
    }

    fn stop_all(&self, _services: &[Service]) -> Result<()> {
        delete_manifests(&k8s_dir())
    }

    fn restart(&self, service: &Service) -> Result<()> {
        let target = format!("deployment/{}", service.name);
        tracing::info!(service = %service.name, "rolling restart");
        let out = exec::run_capture("kubectl", ["rollout", "restart", target.as_str()])?;
        if out.success() {
            Ok(())
        } else {
            Err(FleetError::Backend {
                message: format!("rollout restart failed: {}", out.stderr.trim()),
            })
        }
    }

    fn scale(&self, service: &Service, replicas: u32) -> Result<ScaleOutcome> {
        let target = format!("deployment/{}", service.name);
        let count = format!("--replicas={replicas}");
        let out = exec::run_capture("kubectl", ["scale", target.as_str(), count.as_str()])?;
        if !out.success() {
            return Err(FleetError::Backend {
                message: format!("kubectl scale failed: {}", out.stderr.trim()),
            });
        }
        // Block until the backend reports the new count stable.
        let code = exec::run_streaming("kubectl", ["rollout", "status", target.as_str()])?;
        if code == 0 {
            Ok(ScaleOutcome::Applied { replicas })
        } else {
            Err(FleetError::Backend {
                message: format!("rollout did not stabilize for {target}"),
            })
        }
    }

    fn detail(&self, service: &Service) -> Option<String> {
        let out = exec::run_capture(
            "kubectl",
            ["get", "pods", "-l", selector(service).as_str(), "-o", "wide"],
        )
        .ok()?;
        if out.success() && out.stdout.lines().count() > 1 {
            Some(out.stdout.trim_end().to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const READY_POD: &str = r#"{
        "items": [{
            "status": {
                "phase": "Running",
                "conditions": [
                    {"type": "Initialized", "status": "True"},
                    {"type": "Ready", "status": "True"}
                ]
            }
        }]
    }"#;

    const UNREADY_POD: &str = r#"{
        "items": [{
            "status": {
                "phase": "Pending",
                "conditions": [{"type": "Ready", "status": "False"}]
            }
        }]
    }"#;

    #[test]
    fn ready_condition_yields_reachable() {
        assert_eq!(readiness_from_pods(READY_POD), HealthOutcome::Reachable);
    }

    #[test]
    fn unready_condition_yields_unreachable() {
        assert_eq!(readiness_from_pods(UNREADY_POD), HealthOutcome::Unreachable);
    }

    #[test]
    fn missing_ready_condition_yields_unreachable() {
        let json = r#"{"items": [{"status": {"phase": "Running", "conditions": []}}]}"#;
        assert_eq!(readiness_from_pods(json), HealthOutcome::Unreachable);
    }

    #[test]
    fn empty_listing_is_unknown_not_down() {
        let outcome = readiness_from_pods(r#"{"items": []}"#);
        assert!(matches!(outcome, HealthOutcome::Unknown(_)));
    }

    #[test]
    fn unparsable_listing_is_unknown() {
        assert!(matches!(
            readiness_from_pods("not json"),
            HealthOutcome::Unknown(_)
        ));
    }

    #[test]
    fn first_pod_wins_the_tie_break() {
        // Two pods, first Ready, second not: the listing order decides.
        let json = r#"{
            "items": [
                {"status": {"phase": "Running",
                            "conditions": [{"type": "Ready", "status": "True"}]}},
                {"status": {"phase": "Pending",
                            "conditions": [{"type": "Ready", "status": "False"}]}}
            ]
        }"#;
        assert_eq!(readiness_from_pods(json), HealthOutcome::Reachable);
    }

    #[test]
    fn selector_uses_the_service_name_as_label_value() {
        let svc = Service {
            name: fleet_common::types::ServiceName::new("user_service"),
            dir: std::path::PathBuf::from("services/user_service"),
            port: None,
        };
        assert_eq!(selector(&svc), "app=user_service");
    }

    #[test]
    fn stop_all_without_manifests_directory_is_not_found() {
        let root = tempfile::tempdir().expect("tempdir");
        let missing = root.path().join("manifests");
        let err = delete_manifests(&missing).expect_err("missing directory must fail");
        assert!(matches!(
            err,
            FleetError::NotFound {
                kind: "manifests directory",
                ..
            }
        ));
    }

    #[test]
    fn pods_detail_summarizes_count_and_phase() {
        assert_eq!(pods_detail(READY_POD), "1 pod(s), first phase Running");
        assert_eq!(pods_detail(r#"{"items": []}"#), "0 pods");
    }
}
