//! Formatted output helpers for CLI commands.
//!
//! Every outcome renders as one line naming the service and its state;
//! no operation is silent on failure.

use fleet_common::types::{DescribeReport, HealthOutcome, ServiceName, StatusReport};

/// Operator-facing label for a health outcome in `status` output.
#[must_use]
pub const fn status_label(outcome: &HealthOutcome) -> &'static str {
    match outcome {
        HealthOutcome::Reachable => "Running",
        HealthOutcome::Unreachable => "Not responding",
        HealthOutcome::Unknown(_) => "Unknown",
    }
}

/// One `status` line: service, label, backend detail.
#[must_use]
pub fn status_line(name: &ServiceName, report: &StatusReport) -> String {
    format!(
        "{:<28} {:<16} {}",
        name.as_str(),
        status_label(&report.health),
        report.detail
    )
}

/// One `health` line: service and raw outcome.
#[must_use]
pub fn health_line(name: &ServiceName, outcome: &HealthOutcome) -> String {
    format!("{:<28} {outcome}", name.as_str())
}

/// Multi-line `debug` block for one service.
#[must_use]
pub fn describe_block(name: &ServiceName, report: &DescribeReport) -> String {
    let mut block = format!("=== {name} ===\nhealth: {}\n", report.health);
    match &report.detail {
        Some(detail) => {
            block.push_str("detail:\n");
            for line in detail.lines() {
                block.push_str("  ");
                block.push_str(line);
                block.push('\n');
            }
        }
        None => block.push_str("detail: not found\n"),
    }
    match &report.log_tail {
        Some(tail) => {
            block.push_str("recent logs:\n");
            for line in tail.lines() {
                block.push_str("  ");
                block.push_str(line);
                block.push('\n');
            }
        }
        None => block.push_str("recent logs: not found\n"),
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_status_prints_label_and_declared_port() {
        let line = status_line(
            &ServiceName::new("user_service"),
            &StatusReport {
                health: HealthOutcome::Unreachable,
                detail: "port 9001".into(),
            },
        );
        assert!(line.contains("user_service"));
        assert!(line.contains("Not responding"));
        assert!(line.contains("9001"));
    }

    #[test]
    fn unknown_status_is_labeled_unknown() {
        let line = status_line(
            &ServiceName::new("test_service"),
            &StatusReport {
                health: HealthOutcome::Unknown("no PORT declared in .env".into()),
                detail: "no declared port".into(),
            },
        );
        assert!(line.contains("Unknown"));
    }

    #[test]
    fn describe_block_marks_missing_fields() {
        let block = describe_block(
            &ServiceName::new("user_service"),
            &DescribeReport {
                health: HealthOutcome::Unreachable,
                log_tail: None,
                detail: None,
            },
        );
        assert!(block.contains("detail: not found"));
        assert!(block.contains("recent logs: not found"));
    }

    #[test]
    fn describe_block_indents_present_fields() {
        let block = describe_block(
            &ServiceName::new("user_service"),
            &DescribeReport {
                health: HealthOutcome::Reachable,
                log_tail: Some("one\ntwo".into()),
                detail: Some("pid 42 python app.py".into()),
            },
        );
        assert!(block.contains("  one\n  two\n"));
        assert!(block.contains("  pid 42 python app.py\n"));
    }
}
