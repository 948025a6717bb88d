//! Stale pull request audit operation.

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use prmonitor::github::{OwnershipSource, PullRequestGateway};
use prmonitor::report::read_template;
use prmonitor::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use prmonitor::{
    HttpOwnershipSource, MonitorConfig, MonitorError, OctocrabGateway, PersonalAccessToken,
    RepositoryLocator, StaleAudit, render_html, write_report,
};

/// What a finished audit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditOutcome {
    /// Report file that was written.
    pub path: Utf8PathBuf,
    /// Stale pull requests listed in the report.
    pub stale: usize,
    /// Owner groups in the report.
    pub groups: usize,
    /// Stale pull requests left out for lack of a scope.
    pub unscoped: usize,
}

/// Audits the configured repository and writes the HTML report.
///
/// # Errors
///
/// Returns [`MonitorError::Configuration`] or [`MonitorError::MissingToken`]
/// for unusable configuration, any GitHub or ownership fetch error, and
/// [`MonitorError::Template`] or [`MonitorError::Io`] when the report cannot
/// be produced.
pub async fn run(config: &MonitorConfig, today: NaiveDate) -> Result<AuditOutcome, MonitorError> {
    let ownership = HttpOwnershipSource::new()?;
    run_with_gateway_builder(config, today, OctocrabGateway::for_token, &ownership).await
}

/// Audits using a custom gateway builder and ownership source.
///
/// This function is exposed for testing with stub gateways.
pub async fn run_with_gateway_builder<G, F, O>(
    config: &MonitorConfig,
    today: NaiveDate,
    build_gateway: F,
    ownership: &O,
) -> Result<AuditOutcome, MonitorError>
where
    G: PullRequestGateway,
    F: FnOnce(&PersonalAccessToken, &RepositoryLocator) -> Result<G, MonitorError>,
    O: OwnershipSource + ?Sized,
{
    let settings = config.audit_settings(today)?;
    let locator = config.locator()?;
    let output = config.output_path()?;
    let template = config.template_path().map(read_template).transpose()?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;

    let gateway = build_gateway(&token, &locator)?;
    let telemetry = telemetry_sink(config.telemetry);
    let report = StaleAudit::new(&gateway, ownership)
        .with_telemetry(telemetry.as_ref())
        .run(&locator, &settings)
        .await?;

    let html = render_html(&report, template.as_deref())?;
    write_report(&output, &html)?;
    tracing::info!(path = %output, rows = report.row_count(), "wrote report");

    Ok(AuditOutcome {
        path: output,
        stale: report.row_count(),
        groups: report.groups.len(),
        unscoped: report.totals.unscoped,
    })
}

fn telemetry_sink(enabled: bool) -> Box<dyn TelemetrySink> {
    if enabled {
        Box::new(StderrJsonlTelemetrySink)
    } else {
        Box::new(NoopTelemetrySink)
    }
}
