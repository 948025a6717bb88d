//! Scenario state and audit execution for the stale audit BDD tests.

use chrono::NaiveDate;
use prmonitor::report::render_html;
use prmonitor::{
    AuditReport, HttpOwnershipSource, MonitorConfig, MonitorError, OctocrabGateway,
    PersonalAccessToken, StaleAudit,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::runtime::{SharedRuntime, mount};

#[derive(ScenarioState, Default)]
pub(crate) struct AuditState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) repository: Slot<(String, String)>,
    pub(crate) pull_requests: Slot<Vec<Value>>,
    pub(crate) report: Slot<AuditReport>,
    pub(crate) html: Slot<String>,
    pub(crate) error: Slot<MonitorError>,
}

impl AuditState {
    pub(crate) fn repository(&self) -> Result<(String, String), MonitorError> {
        self.repository.get().ok_or_else(|| MonitorError::Configuration {
            message: "repository not set".to_owned(),
        })
    }

    pub(crate) fn server_uri(&self) -> Result<String, MonitorError> {
        self.server
            .with_ref(MockServer::uri)
            .ok_or_else(|| MonitorError::InvalidUrl("mock server URL missing".to_owned()))
    }

    pub(crate) fn repository_api_path(&self, suffix: &str) -> Result<String, MonitorError> {
        let (owner, repo) = self.repository()?;
        Ok(format!("/api/v3/repos/{owner}/{repo}{suffix}"))
    }

    pub(crate) fn add_pull_request(&self, pull_request: Value) {
        let mut pull_requests = self.pull_requests.take().unwrap_or_default();
        pull_requests.push(pull_request);
        self.pull_requests.set(pull_requests);
    }

    pub(crate) fn mount(&self, mock: Mock) -> Result<(), MonitorError> {
        mount(&self.runtime, &self.server, mock)
    }
}

fn mount_pull_request_listing(state: &AuditState) -> Result<(), MonitorError> {
    let Some(pull_requests) = state.pull_requests.get() else {
        return Ok(());
    };
    let mock = Mock::given(method("GET"))
        .and(path(state.repository_api_path("/pulls")?))
        .and(query_param("state", "open"))
        .and(query_param("base", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&pull_requests));
    state.mount(mock)
}

/// Audits the mock repository as of `today` and renders the built-in report.
pub(crate) fn run_audit(
    state: &AuditState,
    today: NaiveDate,
    stale_days: u32,
) -> Result<(AuditReport, String), MonitorError> {
    mount_pull_request_listing(state)?;

    let server_uri = state.server_uri()?;
    let (owner, repo) = state.repository()?;
    let config = MonitorConfig {
        token: Some("test-token".to_owned()),
        server: Some(server_uri.clone()),
        owner: Some(owner),
        repo: Some(repo),
        stale_days: Some(stale_days),
        ownership_url: Some(format!("{server_uri}/owners/area-owners.md")),
        ..Default::default()
    };

    let settings = config.audit_settings(today)?;
    let locator = config.locator()?;
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let runtime = state.runtime.get().ok_or_else(|| MonitorError::Io {
        message: "runtime not initialised".to_owned(),
    })?;

    let report = runtime.block_on(async {
        let gateway = OctocrabGateway::for_token(&token, &locator)?;
        let ownership = HttpOwnershipSource::new()?;
        StaleAudit::new(&gateway, &ownership)
            .run(&locator, &settings)
            .await
    })?;
    let html = render_html(&report, None)?;

    Ok((report, html))
}
