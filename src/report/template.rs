//! HTML rendering of audit reports with Jinja2-compatible templates.
//!
//! # Available Variables
//!
//! - `repository`: `owner/repo`
//! - `date`: report date formatted like `07 March 2025`
//! - `generated_on`: report date (ISO 8601)
//! - `cutoff`: last day that did not count as recent (ISO 8601)
//! - `totals`: `open`, `drafts`, `skipped`, `active`, `stale`, `unscoped`
//! - `groups`: list of groups with `owner` and `rows`
//!
//! Each row exposes `title`, `url`, `assignee` (may be none), `scope` and
//! `stale_days`. Output is HTML-escaped.

use minijinja::{AutoEscape, Environment, context};

use crate::github::MonitorError;

use super::AuditReport;

/// Template used when no override is configured.
pub const BUILTIN_TEMPLATE: &str = include_str!("report.html.j2");

const TEMPLATE_NAME: &str = "report.html";

/// Renders `report` as HTML.
///
/// `template` overrides [`BUILTIN_TEMPLATE`] when given.
///
/// # Errors
///
/// Returns [`MonitorError::Template`] when the template has syntax errors or
/// fails to render.
pub fn render_html(report: &AuditReport, template: Option<&str>) -> Result<String, MonitorError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    env.add_template(TEMPLATE_NAME, template.unwrap_or(BUILTIN_TEMPLATE))
        .map_err(|error| MonitorError::Template {
            message: format!("invalid template syntax: {error}"),
        })?;

    let ctx = context! {
        repository => &report.repository,
        date => report.generated_on.format("%d %B %Y").to_string(),
        generated_on => report.generated_on,
        cutoff => report.cutoff,
        totals => report.totals,
        groups => &report.groups,
    };

    let tmpl = env
        .get_template(TEMPLATE_NAME)
        .map_err(|error| MonitorError::Template {
            message: format!("failed to retrieve template: {error}"),
        })?;

    tmpl.render(ctx).map_err(|error| MonitorError::Template {
        message: format!("template rendering failed: {error}"),
    })
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
