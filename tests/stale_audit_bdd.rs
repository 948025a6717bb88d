//! Behavioural tests for the stale pull request audit against a mock GitHub.

#[path = "stale_audit_bdd/mod.rs"]
mod stale_audit_bdd_support;

use chrono::NaiveDate;
use prmonitor::MonitorError;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use stale_audit_bdd_support::runtime::ensure_runtime_and_server;
use stale_audit_bdd_support::{
    AuditState, commit_json, issue_comment_json, pull_request_json, run_audit, user_json,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const COMMUNITY: &str = "community-contribution";
const NETWORKING: &str = "area-System.Net";

#[fixture]
fn audit_state() -> AuditState {
    AuditState::default()
}

fn failure(message: impl Into<String>) -> MonitorError {
    MonitorError::Api {
        message: message.into(),
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, MonitorError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|error| failure(format!("invalid date {value}: {error}")))
}

fn json_get(route: String, body: &Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// Mounts the head commit and comment endpoints of pull request `number`.
fn mount_activity(
    audit_state: &AuditState,
    number: u64,
    committed_on: &str,
    issue_comments: &Value,
) -> Result<(), MonitorError> {
    let sha = format!("sha{number}");
    audit_state.mount(json_get(
        audit_state.repository_api_path(&format!("/commits/{sha}"))?,
        &commit_json(&sha, committed_on),
    ))?;
    audit_state.mount(json_get(
        audit_state.repository_api_path(&format!("/pulls/{number}/comments"))?,
        &json!([]),
    ))?;
    audit_state.mount(json_get(
        audit_state.repository_api_path(&format!("/issues/{number}/comments"))?,
        issue_comments,
    ))
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a mock GitHub API for {repository}")]
fn start_mock_api(audit_state: &AuditState, repository: String) -> Result<(), MonitorError> {
    let (owner, repo) = repository
        .split_once('/')
        .ok_or_else(|| failure(format!("expected owner/repo, got {repository}")))?;
    audit_state
        .repository
        .set((owner.to_owned(), repo.to_owned()));
    ensure_runtime_and_server(&audit_state.runtime, &audit_state.server).map(drop)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("the area owners document assigns {label} to {lead}")]
fn serve_owners_document(
    audit_state: &AuditState,
    label: String,
    lead: String,
) -> Result<(), MonitorError> {
    let document = format!(
        "# Area owners\n\n| Area | Lead | Owners |\n|------|------|--------|\n| {label} | {lead} | @dotnet/ncl |\n"
    );
    let mock = Mock::given(method("GET"))
        .and(path("/owners/area-owners.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string(document));
    audit_state.mount(mock)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a community pull request {number:u64} last committed on {date} and assigned to {login}")]
fn stale_assigned_pull_request(
    audit_state: &AuditState,
    number: u64,
    date: String,
    login: String,
) -> Result<(), MonitorError> {
    audit_state.add_pull_request(pull_request_json(
        number,
        false,
        &[COMMUNITY, NETWORKING],
        &[&login],
    ));
    mount_activity(audit_state, number, &date, &json!([]))?;
    audit_state.mount(json_get(
        format!("/api/v3/users/{login}"),
        &user_json(&login, "Alice Example"),
    ))
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a community pull request {number:u64} commented on {date}")]
fn recently_commented_pull_request(
    audit_state: &AuditState,
    number: u64,
    date: String,
) -> Result<(), MonitorError> {
    audit_state.add_pull_request(pull_request_json(
        number,
        false,
        &[COMMUNITY, NETWORKING],
        &[],
    ));
    let comments = json!([
        issue_comment_json(1, "2025-01-02", "@dotnet/ncl PTAL"),
        issue_comment_json(2, &date, "Rebased onto main and addressed the review feedback."),
    ]);
    mount_activity(audit_state, number, "2025-01-01", &comments)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a community pull request {number:u64} labelled {label}")]
fn labelled_pull_request(
    audit_state: &AuditState,
    number: u64,
    label: String,
) -> Result<(), MonitorError> {
    audit_state.add_pull_request(pull_request_json(number, false, &[COMMUNITY, &label], &[]));
    mount_activity(audit_state, number, "2025-01-01", &json!([]))
}

#[given("a draft pull request {number:u64}")]
fn draft_pull_request(audit_state: &AuditState, number: u64) {
    audit_state.add_pull_request(pull_request_json(
        number,
        true,
        &[COMMUNITY, NETWORKING],
        &[],
    ));
}

#[given("the GitHub API rejects the token")]
fn reject_token(audit_state: &AuditState) -> Result<(), MonitorError> {
    let mock = Mock::given(method("GET"))
        .and(path(audit_state.repository_api_path("/pulls")?))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        );
    audit_state.mount(mock)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("the repository is audited on {date} with a {days:u32} day window")]
fn audit_repository(audit_state: &AuditState, date: String, days: u32) -> Result<(), MonitorError> {
    let today = parse_day(&date)?;

    match run_audit(audit_state, today, days) {
        Ok((report, html)) => {
            drop(audit_state.error.take());
            audit_state.report.set(report);
            audit_state.html.set(html);
        }
        Err(error) => {
            drop(audit_state.report.take());
            audit_state.error.set(error);
        }
    }
    Ok(())
}

#[then("the audit counts {stale:usize} stale and {active:usize} active pull requests")]
fn assert_stale_and_active(
    audit_state: &AuditState,
    stale: usize,
    active: usize,
) -> Result<(), MonitorError> {
    let totals = audit_state
        .report
        .with_ref(|report| report.totals)
        .ok_or_else(|| failure("audit report missing"))?;

    if totals.stale == stale && totals.active == active {
        Ok(())
    } else {
        Err(failure(format!(
            "expected {stale} stale and {active} active, got {totals:?}"
        )))
    }
}

#[then("the audit counts {drafts:usize} draft pull requests")]
fn assert_drafts(audit_state: &AuditState, drafts: usize) -> Result<(), MonitorError> {
    let actual = audit_state
        .report
        .with_ref(|report| report.totals.drafts)
        .ok_or_else(|| failure("audit report missing"))?;

    if actual == drafts {
        Ok(())
    } else {
        Err(failure(format!("expected {drafts} drafts, got {actual}")))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the report lists pull request {number:u64} under {owner}")]
fn assert_listed_under(
    audit_state: &AuditState,
    number: u64,
    owner: String,
) -> Result<(), MonitorError> {
    let suffix = format!("/pull/{number}");
    let listed = audit_state
        .report
        .with_ref(|report| {
            report.groups.iter().any(|group| {
                group.owner == owner && group.rows.iter().any(|row| row.url.ends_with(&suffix))
            })
        })
        .ok_or_else(|| failure("audit report missing"))?;

    if listed {
        Ok(())
    } else {
        Err(failure(format!("pull request {number} not listed under {owner}")))
    }
}

#[then("the report has no owner groups")]
fn assert_no_groups(audit_state: &AuditState) -> Result<(), MonitorError> {
    let (groups, unscoped) = audit_state
        .report
        .with_ref(|report| (report.groups.len(), report.totals.unscoped))
        .ok_or_else(|| failure("audit report missing"))?;

    if groups == 0 && unscoped == 1 {
        Ok(())
    } else {
        Err(failure(format!(
            "expected no groups and one unscoped, got {groups} groups and {unscoped} unscoped"
        )))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the rendered report mentions {text}")]
fn assert_html_mentions(audit_state: &AuditState, text: String) -> Result<(), MonitorError> {
    let mentioned = audit_state
        .html
        .with_ref(|html| html.contains(&text))
        .ok_or_else(|| failure("rendered report missing"))?;

    if mentioned {
        Ok(())
    } else {
        Err(failure(format!("rendered report does not mention {text}")))
    }
}

#[then("the audit fails with an authentication error")]
fn assert_authentication_error(audit_state: &AuditState) -> Result<(), MonitorError> {
    let error = audit_state
        .error
        .with_ref(Clone::clone)
        .ok_or_else(|| failure("expected the audit to fail"))?;

    if matches!(error, MonitorError::Authentication { .. }) {
        Ok(())
    } else {
        Err(failure(format!("expected authentication error, got {error:?}")))
    }
}

#[scenario(path = "tests/features/stale_audit.feature", index = 0)]
fn stale_pull_requests_grouped_by_owner(audit_state: AuditState) {
    let _ = audit_state;
}

#[scenario(path = "tests/features/stale_audit.feature", index = 1)]
fn drafts_are_not_inspected(audit_state: AuditState) {
    let _ = audit_state;
}

#[scenario(path = "tests/features/stale_audit.feature", index = 2)]
fn unowned_scopes_are_left_out(audit_state: AuditState) {
    let _ = audit_state;
}

#[scenario(path = "tests/features/stale_audit.feature", index = 3)]
fn rejected_credentials_abort(audit_state: AuditState) {
    let _ = audit_state;
}
