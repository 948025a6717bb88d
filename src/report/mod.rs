//! Stale pull request report model, grouping and output.
//!
//! [`ReportGrouper`] turns classified pull requests into ordered owner
//! groups. The audit converts those into [`RenderedGroup`] rows, which
//! [`render_html`] feeds through a Jinja2 template and [`write_report`]
//! persists.

mod grouping;
mod sink;
mod template;

use chrono::NaiveDate;
use serde::Serialize;

pub use grouping::{GroupedItem, Grouping, ReportGroup, ReportGrouper, StalePullRequest};
pub use sink::{read_template, write_report};
pub use template::{BUILTIN_TEMPLATE, render_html};

/// Classification counts of one audit run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditTotals {
    /// Open pull requests against the base branch.
    pub open: usize,
    /// Draft pull requests, never classified.
    pub drafts: usize,
    /// Pull requests excluded by the label filter.
    pub skipped: usize,
    /// Pull requests with recent activity.
    pub active: usize,
    /// Pull requests without recent activity.
    pub stale: usize,
    /// Stale pull requests without a resolvable scope.
    pub unscoped: usize,
}

/// One table row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Trimmed pull request title.
    pub title: String,
    /// Pull request URL.
    pub url: String,
    /// Display name of the first assignee, when known.
    pub assignee: Option<String>,
    /// Scope value with its prefix stripped.
    pub scope: String,
    /// Whole days between the last activity and the report date.
    pub stale_days: u64,
}

impl ReportRow {
    /// Builds the row of `item` as of `today`.
    #[must_use]
    pub fn new(item: &GroupedItem, assignee: Option<String>, today: NaiveDate) -> Self {
        Self {
            title: item.pull_request.title.trim().to_owned(),
            url: item.pull_request.html_url.clone(),
            assignee,
            scope: item.scope.value().to_owned(),
            stale_days: stale_days(today, item.last_activity),
        }
    }
}

/// Owner heading with its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGroup {
    /// Owner display name.
    pub owner: String,
    /// Rows in report order.
    pub rows: Vec<ReportRow>,
}

/// Complete result of an audit, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// `owner/repo` of the audited repository.
    pub repository: String,
    /// Day the report describes.
    pub generated_on: NaiveDate,
    /// Last day that did not count as recent.
    pub cutoff: NaiveDate,
    /// Classification counts.
    pub totals: AuditTotals,
    /// Owner groups in report order.
    pub groups: Vec<RenderedGroup>,
}

impl AuditReport {
    /// Number of pull requests listed in the report.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }
}

/// Whole days from `last_activity` to `today`, zero when not in the past.
#[must_use]
pub fn stale_days(today: NaiveDate, last_activity: NaiveDate) -> u64 {
    u64::try_from(today.signed_duration_since(last_activity).num_days()).unwrap_or(0)
}
