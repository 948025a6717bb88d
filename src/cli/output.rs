//! Output formatting utilities for CLI operations.

use std::io::Write;

use prmonitor::MonitorError;

use super::audit::AuditOutcome;

/// Writes a one-line summary of a finished audit to the given writer.
pub fn write_audit_summary<W: Write>(
    writer: &mut W,
    outcome: &AuditOutcome,
) -> Result<(), MonitorError> {
    let noun = if outcome.stale == 1 {
        "pull request"
    } else {
        "pull requests"
    };
    writeln!(
        writer,
        "Wrote {}: {} stale {noun} in {} owner groups ({} without a scope)",
        outcome.path, outcome.stale, outcome.groups, outcome.unscoped
    )
    .map_err(|error| MonitorError::Io {
        message: error.to_string(),
    })
}
