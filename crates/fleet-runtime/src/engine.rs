//! Invocation engine: adapter selection and sequential fan-out.

use fleet_common::error::Result;
use fleet_common::types::{ExecutionMode, Service, ServiceName};

use crate::backend::{self, ServiceBackend};

/// One invocation's view of the backend.
///
/// The adapter is selected exactly once at construction; the engine
/// never re-probes the environment mid-command, even if the backend's
/// state changes during execution.
pub struct Engine {
    backend: Box<dyn ServiceBackend>,
}

impl Engine {
    /// Creates an engine for the resolved execution mode.
    #[must_use]
    pub fn for_mode(mode: ExecutionMode) -> Self {
        tracing::debug!(%mode, "selecting backend adapter");
        Self {
            backend: backend::for_mode(mode),
        }
    }

    /// Creates an engine over an explicit adapter (used by tests).
    #[must_use]
    pub fn with_backend(backend: Box<dyn ServiceBackend>) -> Self {
        Self { backend }
    }

    /// The mode this engine's adapter serves.
    #[must_use]
    pub fn mode(&self) -> ExecutionMode {
        self.backend.mode()
    }

    /// The selected backend adapter.
    #[must_use]
    pub fn backend(&self) -> &dyn ServiceBackend {
        self.backend.as_ref()
    }

    /// Applies one operation to every service, sequentially, in the
    /// given (discovery) order.
    ///
    /// Partial-failure semantics: a failure on one service never halts
    /// the remaining services; every service yields exactly one
    /// independent result, reported in order.
    pub fn fan_out<T, F>(&self, services: &[Service], mut op: F) -> Vec<(ServiceName, Result<T>)>
    where
        F: FnMut(&dyn ServiceBackend, &Service) -> Result<T>,
    {
        services
            .iter()
            .map(|service| {
                let result = op(self.backend.as_ref(), service);
                if let Err(e) = &result {
                    tracing::warn!(service = %service.name, error = %e, "operation failed");
                }
                (service.name.clone(), result)
            })
            .collect()
    }
}
