//! Stale community pull request auditing for GitHub repositories.
//!
//! The library lists open pull requests, decides which have had no qualifying
//! activity within a trailing window, attributes each stale one to the owner
//! of its scope label and renders a grouped HTML report.

pub mod activity;
pub mod audit;
pub mod config;
pub mod github;
pub mod owners;
pub mod report;
pub mod scope;
pub mod telemetry;

pub use activity::{ActivityEvaluator, ActivityTrigger, Classification, Cutoff};
pub use audit::{AuditSettings, StaleAudit};
pub use config::MonitorConfig;
pub use github::{
    HttpOwnershipSource, MonitorError, OctocrabGateway, OwnershipSource, PersonalAccessToken,
    PullRequest, PullRequestGateway, RepositoryLocator,
};
pub use owners::{OwnerDirectory, OwnerSeed};
pub use report::{AuditReport, AuditTotals, render_html, write_report};
pub use scope::{ScopeLabel, ScopeResolver};
