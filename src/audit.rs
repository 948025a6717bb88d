//! End-to-end stale pull request audit of one repository.
//!
//! The audit builds the owner directory, lists open pull requests, filters
//! them by label, classifies each remaining one, groups the stale ones by
//! owner and resolves assignee names for the report rows. Any provider
//! failure aborts the run; mapping gaps are only logged.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::activity::{ActivityEvaluator, Classification, Cutoff};
use crate::github::{
    MonitorError, OwnershipSource, PullRequest, PullRequestGateway, RepositoryLocator,
};
use crate::owners::{OWNERSHIP_PREFIXES, OwnerDirectory, OwnerSeed};
use crate::report::{
    AuditReport, AuditTotals, Grouping, RenderedGroup, ReportGrouper, ReportRow, StalePullRequest,
};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Inputs of one audit run that do not come from GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSettings {
    /// Base branch pull requests must target.
    pub base_branch: String,
    /// Label a pull request must carry to be audited.
    pub required_label: String,
    /// Label that excludes a pull request from the audit.
    pub skip_label: String,
    /// Location of the area-ownership document.
    pub ownership_url: String,
    /// Day the report describes; stale-day counts are relative to it.
    pub today: NaiveDate,
    /// Activity after this day is recent.
    pub cutoff: Cutoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Triage {
    Draft,
    Skipped,
    Audited,
}

fn triage(pull_request: &PullRequest, settings: &AuditSettings) -> Triage {
    if pull_request.draft {
        Triage::Draft
    } else if pull_request.has_label(&settings.skip_label)
        || !pull_request.has_label(&settings.required_label)
    {
        Triage::Skipped
    } else {
        Triage::Audited
    }
}

/// Runs stale pull request audits against a gateway and ownership source.
pub struct StaleAudit<'a, G, O>
where
    G: PullRequestGateway + ?Sized,
    O: OwnershipSource + ?Sized,
{
    gateway: &'a G,
    ownership: &'a O,
    telemetry: &'a dyn TelemetrySink,
    seed: OwnerSeed,
}

impl<'a, G, O> StaleAudit<'a, G, O>
where
    G: PullRequestGateway + ?Sized,
    O: OwnershipSource + ?Sized,
{
    /// Creates an audit using the default owner seed and no telemetry.
    #[must_use]
    pub fn new(gateway: &'a G, ownership: &'a O) -> Self {
        Self {
            gateway,
            ownership,
            telemetry: &NoopTelemetrySink,
            seed: OwnerSeed::default(),
        }
    }

    /// Replaces the owner seed.
    #[must_use]
    pub fn with_seed(mut self, seed: OwnerSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Records the completion event to `telemetry`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Builds the owner directory from the seed and the ownership document.
    ///
    /// # Errors
    ///
    /// Returns the ownership source error when the document cannot be
    /// fetched.
    pub async fn load_directory(&self, url: &str) -> Result<OwnerDirectory, MonitorError> {
        let mut directory = OwnerDirectory::bootstrap(&self.seed);
        let document = self.ownership.fetch_text(url).await?;
        let summary = directory.ingest(&document, &OWNERSHIP_PREFIXES);
        tracing::info!(
            url,
            added = summary.added,
            duplicates = summary.duplicates,
            rejected = summary.rejected,
            scopes = directory.len(),
            "loaded area owners"
        );
        Ok(directory)
    }

    /// Audits the repository at `locator`.
    ///
    /// # Errors
    ///
    /// Returns the first gateway or ownership source error; no partial report
    /// is produced.
    pub async fn run(
        &self,
        locator: &RepositoryLocator,
        settings: &AuditSettings,
    ) -> Result<AuditReport, MonitorError> {
        let repository = locator.full_name();
        tracing::info!(repository = %repository, "starting stale pull request audit");

        let directory = self.load_directory(&settings.ownership_url).await?;

        let pull_requests = self
            .gateway
            .list_open_pull_requests(locator, &settings.base_branch)
            .await?;
        tracing::info!(
            count = pull_requests.len(),
            base = %settings.base_branch,
            "listed open pull requests"
        );
        let audited = pull_requests
            .iter()
            .filter(|pull_request| triage(pull_request, settings) == Triage::Audited)
            .count();
        self.check_quota(audited).await;

        let mut totals = AuditTotals {
            open: pull_requests.len(),
            ..AuditTotals::default()
        };
        let stale = self
            .classify_all(locator, settings, pull_requests, &mut totals)
            .await?;

        let grouping = ReportGrouper::new(&directory).group(stale);
        totals.unscoped = grouping.unscoped.len();
        let groups = self.render_groups(grouping, settings.today).await?;

        tracing::info!(
            open = totals.open,
            drafts = totals.drafts,
            skipped = totals.skipped,
            active = totals.active,
            stale = totals.stale,
            unscoped = totals.unscoped,
            "audit complete"
        );
        self.telemetry.record(TelemetryEvent::AuditCompleted {
            repository: repository.clone(),
            open: totals.open,
            drafts: totals.drafts,
            skipped: totals.skipped,
            active: totals.active,
            stale: totals.stale,
            unscoped: totals.unscoped,
            groups: groups.len(),
        });

        Ok(AuditReport {
            repository,
            generated_on: settings.today,
            cutoff: settings.cutoff.date(),
            totals,
            groups,
        })
    }

    async fn check_quota(&self, audited: usize) {
        let Some(info) = self.gateway.rate_limit().await else {
            tracing::debug!("GitHub API quota unavailable");
            return;
        };
        tracing::info!(
            remaining = info.remaining(),
            limit = info.limit(),
            resets_at = ?info.reset_time(),
            "GitHub API quota"
        );
        if !info.covers(u32::try_from(audited).unwrap_or(u32::MAX)) {
            tracing::warn!(
                audited,
                remaining = info.remaining(),
                "GitHub API quota may run out before the audit completes"
            );
        }
    }

    async fn classify_all(
        &self,
        locator: &RepositoryLocator,
        settings: &AuditSettings,
        pull_requests: Vec<PullRequest>,
        totals: &mut AuditTotals,
    ) -> Result<Vec<StalePullRequest>, MonitorError> {
        let evaluator = ActivityEvaluator::new(self.gateway, locator, settings.cutoff);
        let mut stale = Vec::new();

        for pull_request in pull_requests {
            match triage(&pull_request, settings) {
                Triage::Draft => totals.drafts += 1,
                Triage::Skipped => totals.skipped += 1,
                Triage::Audited => {
                    let classification = evaluator.classify(&pull_request).await?;
                    tracing::debug!(
                        pull_request = pull_request.number,
                        outcome = classification.describe(),
                        last_activity = %classification.last_activity(),
                        "classified pull request"
                    );

                    if let Classification::Stale { last_activity } = classification {
                        totals.stale += 1;
                        stale.push(StalePullRequest {
                            pull_request,
                            last_activity,
                        });
                    } else {
                        totals.active += 1;
                    }
                }
            }
        }

        Ok(stale)
    }

    async fn render_groups(
        &self,
        grouping: Grouping,
        today: NaiveDate,
    ) -> Result<Vec<RenderedGroup>, MonitorError> {
        let mut names: HashMap<String, Option<String>> = HashMap::new();
        let mut rendered = Vec::with_capacity(grouping.groups.len());

        for group in grouping.groups {
            let mut rows = Vec::with_capacity(group.items.len());
            for item in &group.items {
                let assignee = self
                    .assignee_name(item.pull_request.first_assignee(), &mut names)
                    .await?;
                rows.push(ReportRow::new(item, assignee, today));
            }
            rendered.push(RenderedGroup {
                owner: group.owner,
                rows,
            });
        }

        Ok(rendered)
    }

    async fn assignee_name(
        &self,
        login: Option<&str>,
        names: &mut HashMap<String, Option<String>>,
    ) -> Result<Option<String>, MonitorError> {
        let Some(login) = login else {
            return Ok(None);
        };
        if let Some(known) = names.get(login) {
            return Ok(known.clone());
        }
        let profile = self.gateway.user(login).await?;
        names.insert(login.to_owned(), profile.display_name.clone());
        Ok(profile.display_name)
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
