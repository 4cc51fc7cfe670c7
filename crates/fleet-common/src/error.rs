//! Unified error types for the Fleet workspace.
//!
//! Expected-absence conditions (a probe tool that is not installed, a
//! backend that declines an operation) are modeled as outcome values in
//! [`crate::types`], not as error variants; only genuinely failed
//! operations land here.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum FleetError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The operator invoked a command without a required modifier.
    #[error("usage error: {message}")]
    Usage {
        /// Description of what the invocation is missing.
        message: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A backend tool invocation failed outright.
    #[error("backend error: {message}")]
    Backend {
        /// Description of the failed backend call.
        message: String,
    },

    /// An out-of-scope collaborator (e.g. the migration tool) failed.
    ///
    /// The one failure class that aborts the whole invocation: the
    /// collaborator's state cannot be assumed consistent afterward.
    #[error("collaborator failure: {message}")]
    Collaborator {
        /// Description of the collaborator failure.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FleetError>;
