//! GitHub data access for stale pull request audits.
//!
//! This module wraps Octocrab to list open pull requests, fetch their head
//! commits, review comments and issue comments, and look up user display
//! names. Errors are mapped into [`MonitorError`] variants so that callers can
//! surface precise failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod rate_limit;

pub use error::MonitorError;
pub use gateway::{HttpOwnershipSource, OctocrabGateway, OwnershipSource, PullRequestGateway};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{Commit, IssueComment, PullRequest, ReviewComment, UserProfile};
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::{MockOwnershipSource, MockPullRequestGateway};
