//! Octocrab implementation of the pull request gateway.

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::github::error::MonitorError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator, user_path};
use crate::github::models::{
    ApiCommit, ApiIssueComment, ApiPullRequest, ApiReviewComment, ApiUserProfile, Commit,
    IssueComment, PullRequest, ReviewComment, UserProfile,
};
use crate::github::rate_limit::RateLimitInfo;

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::pages::{PER_PAGE, fetch_all_pages, fetch_rate_limit_info, map_with_rate_limit};

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::InvalidUrl` when the base URI cannot be parsed or
    /// `MonitorError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, MonitorError> {
        let octocrab = build_octocrab_client(token, locator)?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn list_open_pull_requests(
        &self,
        locator: &RepositoryLocator,
        base_branch: &str,
    ) -> Result<Vec<PullRequest>, MonitorError> {
        let per_page = PER_PAGE.to_string();
        let query = [
            ("state", "open"),
            ("base", base_branch),
            ("per_page", per_page.as_str()),
        ];

        fetch_all_pages::<ApiPullRequest, PullRequest, _>(
            &self.client,
            "list pulls",
            locator.pulls_path(),
            &query,
        )
        .await
    }

    async fn commit(
        &self,
        locator: &RepositoryLocator,
        sha: &str,
    ) -> Result<Commit, MonitorError> {
        match self
            .client
            .get::<ApiCommit, _, _>(locator.commit_path(sha), None::<&()>)
            .await
        {
            Ok(commit) => Ok(commit.into()),
            Err(error) => Err(map_with_rate_limit(&self.client, "commit", &error).await),
        }
    }

    async fn review_comments(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<Vec<ReviewComment>, MonitorError> {
        let per_page = PER_PAGE.to_string();
        let query = [("per_page", per_page.as_str())];

        fetch_all_pages::<ApiReviewComment, ReviewComment, _>(
            &self.client,
            "review comments",
            locator.review_comments_path(number),
            &query,
        )
        .await
    }

    async fn issue_comments(
        &self,
        locator: &RepositoryLocator,
        number: u64,
    ) -> Result<Vec<IssueComment>, MonitorError> {
        let per_page = PER_PAGE.to_string();
        let query = [("per_page", per_page.as_str())];

        fetch_all_pages::<ApiIssueComment, IssueComment, _>(
            &self.client,
            "issue comments",
            locator.issue_comments_path(number),
            &query,
        )
        .await
    }

    async fn user(&self, login: &str) -> Result<UserProfile, MonitorError> {
        match self
            .client
            .get::<ApiUserProfile, _, _>(user_path(login), None::<&()>)
            .await
        {
            Ok(profile) => Ok(profile.into()),
            Err(error) => Err(map_with_rate_limit(&self.client, "user", &error).await),
        }
    }

    async fn rate_limit(&self) -> Option<RateLimitInfo> {
        fetch_rate_limit_info(&self.client).await
    }
}

#[cfg(test)]
#[path = "pull_request_tests.rs"]
mod tests;
