//! Audit telemetry events and sinks.
//!
//! Telemetry is local only: events are either dropped or written to stderr as
//! JSON lines for scripting around scheduled audit runs.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the outcome of a completed audit.
    AuditCompleted {
        /// `owner/repo` of the audited repository.
        repository: String,
        /// Open pull requests against the base branch.
        open: usize,
        /// Draft pull requests.
        drafts: usize,
        /// Pull requests excluded by the label filter.
        skipped: usize,
        /// Pull requests with recent activity.
        active: usize,
        /// Pull requests without recent activity.
        stale: usize,
        /// Stale pull requests without a resolvable scope.
        unscoped: usize,
        /// Owner groups in the report.
        groups: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
