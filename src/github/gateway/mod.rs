//! Gateways for loading audit inputs from GitHub.
//!
//! The traits here are the seams between the audit pipeline and the network:
//! the Octocrab and `reqwest` implementations handle real HTTP requests while
//! tests substitute mocks or fakes.

mod client;
mod error_mapping;
mod ownership;
mod pages;
mod pull_request;

pub use ownership::HttpOwnershipSource;
pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::MonitorError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{Commit, IssueComment, PullRequest, ReviewComment, UserProfile};
use crate::github::rate_limit::RateLimitInfo;

/// Gateway that can load pull requests and their activity.
///
/// Every method may fail with a transport or authorisation error; callers do
/// not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// List every open pull request targeting `base_branch`.
    async fn list_open_pull_requests(
        &self,
        locator: &RepositoryLocator,
        base_branch: &str,
    ) -> Result<Vec<PullRequest>, MonitorError>;

    /// Fetch a commit by SHA.
    async fn commit(&self, locator: &RepositoryLocator, sha: &str)
    -> Result<Commit, MonitorError>;

    /// Fetch all review comments of a pull request.
    async fn review_comments(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<Vec<ReviewComment>, MonitorError>;

    /// Fetch all issue comments of a pull request.
    async fn issue_comments(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<Vec<IssueComment>, MonitorError>;

    /// Fetch a user's public profile.
    async fn user(&self, login: &str) -> Result<UserProfile, MonitorError>;

    /// Current rate limit for the token, when GitHub reports one.
    async fn rate_limit(&self) -> Option<RateLimitInfo>;
}

/// Source of the raw area-ownership document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnershipSource: Send + Sync {
    /// Fetch the document at `url` as text.
    async fn fetch_text(&self, url: &str) -> Result<String, MonitorError>;
}
