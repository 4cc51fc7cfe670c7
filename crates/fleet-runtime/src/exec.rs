//! Subprocess invocation helpers for the backend tooling.
//!
//! All cluster, compose, and process operations go through external
//! tools (`kubectl`, `docker`, `tail`, ...). Invocation is plain
//! blocking `std::process`; the whole system is single-threaded and
//! sequential by design.

use std::ffi::OsStr;
use std::process::Command;

use fleet_common::error::{FleetError, Result};

/// Captured output from a tool invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Exit code returned by the tool (-1 when killed by a signal).
    pub exit_code: i32,
    /// Standard output from the tool.
    pub stdout: String,
    /// Standard error from the tool.
    pub stderr: String,
}

impl ExecOutput {
    /// Returns whether the tool exited successfully.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Returns whether `tool` is installed and on the PATH.
#[must_use]
pub fn tool_available(tool: &str) -> bool {
    which::which(tool).is_ok()
}

/// Runs a tool and captures its output.
///
/// A nonzero exit is not an error here; callers decide whether it is a
/// negative probe signal or a real failure.
///
/// # Errors
///
/// Returns an error only when the tool cannot be spawned at all.
pub fn run_capture<I, S>(program: &str, args: I) -> Result<ExecOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| FleetError::Io {
            path: program.into(),
            source: e,
        })?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Runs a tool with stdio inherited from the operator's terminal.
///
/// Used for streaming operations (`logs --follow`, rollout waits) where
/// the call intentionally does not return until the tool exits or is
/// externally interrupted.
///
/// # Errors
///
/// Returns an error when the tool cannot be spawned or waited on.
pub fn run_streaming<I, S>(program: &str, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| FleetError::Io {
            path: program.into(),
            source: e,
        })?;
    Ok(status.code().unwrap_or(-1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_capture_collects_stdout() {
        let out = run_capture("echo", ["hello"]).expect("echo should spawn");
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn run_capture_nonzero_exit_is_not_an_error() {
        let out = run_capture("sh", ["-c", "exit 3"]).expect("sh should spawn");
        assert!(!out.success());
        assert_eq!(out.exit_code, 3);
    }

    #[test]
    fn run_capture_missing_tool_is_an_error() {
        assert!(run_capture("definitely-not-a-real-tool", ["x"]).is_err());
    }

    #[test]
    fn tool_available_finds_sh() {
        assert!(tool_available("sh"));
        assert!(!tool_available("definitely-not-a-real-tool"));
    }
}
