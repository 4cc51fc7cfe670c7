//! Service registry: directory-convention scanning.

use std::path::Path;

use fleet_common::constants::{ENTRY_MARKER, ENV_FILE};
use fleet_common::error::{FleetError, Result};
use fleet_common::types::{Service, ServiceName};

use crate::envfile;

/// Discovers every manageable service under `root`.
///
/// A subdirectory qualifies iff it contains the entry marker file.
/// Ordering is directory-enumeration order; callers must not depend on
/// it for correctness, only for display. A missing or empty root yields
/// an empty set, not an error; callers that require at least one service
/// check emptiness themselves.
///
/// # Errors
///
/// Returns an error only when the root exists but cannot be enumerated.
pub fn discover(root: &Path) -> Result<Vec<Service>> {
    if !root.exists() {
        tracing::debug!(root = %root.display(), "services root does not exist");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(root).map_err(|e| FleetError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut services = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FleetError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;
        let dir = entry.path();
        if !dir.is_dir() || !dir.join(ENTRY_MARKER).is_file() {
            continue;
        }
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let port = envfile::declared_port(&dir.join(ENV_FILE));
        tracing::debug!(service = name, ?port, "discovered service");
        services.push(Service {
            name: ServiceName::new(name),
            dir,
            port,
        });
    }
    Ok(services)
}

/// Resolves a named service from a discovered set.
///
/// # Errors
///
/// Returns `NotFound` when no discovered service carries the name.
pub fn find<'a>(services: &'a [Service], name: &str) -> Result<&'a Service> {
    services
        .iter()
        .find(|s| s.name.as_str() == name)
        .ok_or_else(|| FleetError::NotFound {
            kind: "service",
            id: name.to_string(),
        })
}
