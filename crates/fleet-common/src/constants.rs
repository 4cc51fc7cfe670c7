//! System-wide constants and directory conventions.

use std::path::PathBuf;
use std::time::Duration;

/// Default directory scanned for manageable services.
pub const DEFAULT_SERVICES_DIR: &str = "services";

/// Environment variable overriding the services directory.
pub const SERVICES_DIR_ENV: &str = "FLEET_SERVICES_DIR";

/// Default directory holding the cluster manifest definitions.
pub const DEFAULT_K8S_DIR: &str = "k8s";

/// Environment variable overriding the manifests directory.
pub const K8S_DIR_ENV: &str = "FLEET_K8S_DIR";

/// Marker file a subdirectory must contain to qualify as a service.
pub const ENTRY_MARKER: &str = "app.py";

/// Per-service configuration file holding the declared port.
pub const ENV_FILE: &str = ".env";

/// Key in the per-service `.env` that declares the listen port.
pub const PORT_KEY: &str = "PORT";

/// Port services listen on inside their containers when none is declared.
pub const DEFAULT_CONTAINER_PORT: u16 = 8080;

/// Health-check path convention exposed by every service.
pub const HEALTH_PATH: &str = "/api/v1/health";

/// Root info path convention exposed by every service.
pub const INFO_PATH: &str = "/api/v1/";

/// Timeout applied to each HTTP health probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Number of log lines returned by a bounded tail.
pub const LOG_TAIL_LINES: usize = 50;

/// Interval between monitor-loop refreshes.
pub const MONITOR_INTERVAL: Duration = Duration::from_secs(5);

/// Relative path of the sibling migration tool, when present.
pub const MIGRATION_TOOL: &str = "db_manager/cli.py";

/// Application name used in CLI output.
pub const APP_NAME: &str = "fleet";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "flt";

/// Returns the services directory, honoring the env override.
#[must_use]
pub fn services_dir() -> PathBuf {
    std::env::var(SERVICES_DIR_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_SERVICES_DIR), PathBuf::from)
}

/// Returns the cluster manifests directory, honoring the env override.
#[must_use]
pub fn k8s_dir() -> PathBuf {
    std::env::var(K8S_DIR_ENV).map_or_else(|_| PathBuf::from(DEFAULT_K8S_DIR), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_dir_tracks_the_env_override() {
        // No env mutation here; assert against whatever the process
        // inherited so the test is order-independent.
        match std::env::var(SERVICES_DIR_ENV) {
            Ok(set) => assert_eq!(services_dir(), PathBuf::from(set)),
            Err(_) => assert_eq!(services_dir(), PathBuf::from(DEFAULT_SERVICES_DIR)),
        }
    }

    #[test]
    fn health_and_info_paths_share_the_api_prefix() {
        assert!(HEALTH_PATH.starts_with(INFO_PATH));
    }
}
