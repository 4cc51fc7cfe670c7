//! Domain primitive types used across the Fleet workspace.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{HEALTH_PATH, INFO_PATH};

/// Unique identifier for a managed service, derived from its directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceName(String);

impl ServiceName {
    /// Creates a new service name from a string value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One independently addressable unit of the managed system.
///
/// Services are discovered fresh on every invocation and never mutated;
/// there is no persisted registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service identity, derived from the directory name.
    pub name: ServiceName,
    /// Directory the service was discovered in.
    pub dir: PathBuf,
    /// Declared listen port from the service's `.env`, when present.
    pub port: Option<u16>,
}

impl Service {
    /// Returns the local health-check URL, if a port is declared.
    #[must_use]
    pub fn health_url(&self) -> Option<String> {
        self.port
            .map(|p| format!("http://127.0.0.1:{p}{HEALTH_PATH}"))
    }

    /// Returns the local root info URL, if a port is declared.
    #[must_use]
    pub fn info_url(&self) -> Option<String> {
        self.port.map(|p| format!("http://127.0.0.1:{p}{INFO_PATH}"))
    }
}

/// The execution environment a command targets.
///
/// Resolved exactly once per invocation, from an explicit `--mode`
/// override or by probing the host, and never re-probed mid-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Locally-run processes addressed via declared ports.
    Local,
    /// A docker-compose container group.
    Compose,
    /// Kubernetes-orchestrated workloads.
    Cluster,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Compose => write!(f, "docker"),
            Self::Cluster => write!(f, "k8s"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = crate::error::FleetError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s {
            "local" => Ok(Self::Local),
            "docker" => Ok(Self::Compose),
            "k8s" => Ok(Self::Cluster),
            other => Err(crate::error::FleetError::Config {
                message: format!("unknown mode: {other} (expected local, docker, or k8s)"),
            }),
        }
    }
}

/// Result of a single health check, per service, per invocation.
///
/// Ephemeral by design: never cached across invocations, always
/// recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthOutcome {
    /// The service answered its health endpoint.
    Reachable,
    /// The service did not answer.
    Unreachable,
    /// The check could not be performed (no addressing info, tool missing).
    Unknown(String),
}

impl fmt::Display for HealthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reachable => write!(f, "reachable"),
            Self::Unreachable => write!(f, "unreachable"),
            Self::Unknown(reason) => write!(f, "unknown ({reason})"),
        }
    }
}

/// Per-service status snapshot: a health outcome plus presentation detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Liveness outcome for the service.
    pub health: HealthOutcome,
    /// Backend-specific detail (declared port, container state, pod
    /// readiness).
    pub detail: String,
}

/// Result of a scale request.
///
/// No replica count is retained after the call returns; the count is
/// always read back from the backend, never tracked locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleOutcome {
    /// The backend accepted the new replica count.
    Applied {
        /// Replica count the backend was asked for.
        replicas: u32,
    },
    /// The backend declines scaling (e.g. local processes).
    Unsupported {
        /// Why the backend declines.
        reason: String,
    },
}

/// Composite snapshot produced by `describe`.
///
/// Best-effort: a missing sub-result is a field-level `None`, never a
/// call failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeReport {
    /// Liveness outcome for the service.
    pub health: HealthOutcome,
    /// Recent log lines, when retrievable.
    pub log_tail: Option<String>,
    /// Backend-specific metadata (process / container / pod detail).
    pub detail: Option<String>,
}
