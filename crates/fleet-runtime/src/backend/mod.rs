//! Backend abstraction for environment-agnostic service operations.

pub mod cluster;
pub mod compose;
pub mod local;

use fleet_common::constants::LOG_TAIL_LINES;
use fleet_common::error::Result;
use fleet_common::types::{
    DescribeReport, ExecutionMode, HealthOutcome, ScaleOutcome, Service, StatusReport,
};

/// Environment-specific translation of the common operation set.
///
/// Implementors map each abstract operation onto their backend's native
/// calls and normalize the result into the shared outcome shapes.
/// `status` and `health` never fail: missing addressing info or an
/// unavailable probe tool yields [`HealthOutcome::Unknown`].
pub trait ServiceBackend {
    /// The execution mode this adapter serves.
    fn mode(&self) -> ExecutionMode;

    /// Returns a status snapshot: liveness plus presentation detail.
    fn status(&self, service: &Service) -> StatusReport;

    /// Performs one health check against the backend's addressing scheme.
    fn health(&self, service: &Service) -> HealthOutcome;

    /// Returns a bounded tail of recent log lines.
    ///
    /// Always returns control to the caller; a service without logs
    /// yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend's log source cannot be read.
    fn log_tail(&self, service: &Service, lines: usize) -> Result<String>;

    /// Streams log lines to the operator's terminal until externally
    /// interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend's log tool cannot be spawned.
    fn log_follow(&self, service: &Service) -> Result<()>;

    /// Stops one service.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn stop(&self, service: &Service) -> Result<()>;

    /// Stops every service this system manages, with mode-specific
    /// scoping (process pattern / compose group / manifests directory).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn stop_all(&self, services: &[Service]) -> Result<()>;

    /// Restarts one service in the backend's native way.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    fn restart(&self, service: &Service) -> Result<()>;

    /// Adjusts the replica count.
    ///
    /// Cluster mode blocks until the rollout reports stable; compose
    /// mode returns immediately; local mode declines with
    /// [`ScaleOutcome::Unsupported`] and performs no state-changing
    /// call.
    ///
    /// # Errors
    ///
    /// Returns an error if an accepted scale call fails outright.
    fn scale(&self, service: &Service, replicas: u32) -> Result<ScaleOutcome>;

    /// Backend-specific metadata for one service (process / container /
    /// pod detail). `None` means "not found", not failure.
    fn detail(&self, service: &Service) -> Option<String>;

    /// Composite best-effort snapshot: health, recent logs, and
    /// backend detail. A missing sub-result is a field-level `None`.
    fn describe(&self, service: &Service) -> DescribeReport {
        DescribeReport {
            health: self.health(service),
            log_tail: self
                .log_tail(service, LOG_TAIL_LINES)
                .ok()
                .filter(|tail| !tail.is_empty()),
            detail: self.detail(service),
        }
    }
}

/// Selects the adapter for the resolved mode.
///
/// This is the single point of mode dispatch; everything downstream is
/// backend-agnostic.
#[must_use]
pub fn for_mode(mode: ExecutionMode) -> Box<dyn ServiceBackend> {
    match mode {
        ExecutionMode::Local => Box::new(local::LocalBackend::new()),
        ExecutionMode::Compose => Box::new(compose::ComposeBackend::new()),
        ExecutionMode::Cluster => Box::new(cluster::ClusterBackend::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_mode_selects_matching_adapter() {
        for mode in [
            ExecutionMode::Local,
            ExecutionMode::Compose,
            ExecutionMode::Cluster,
        ] {
            assert_eq!(for_mode(mode).mode(), mode);
        }
    }
}
