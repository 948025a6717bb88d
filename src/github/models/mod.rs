//! Data models for the pull request data an audit consumes.
//!
//! Types prefixed with `Api` are internal deserialisation targets for GitHub
//! REST responses; they convert into the public domain types, which hold
//! only what the staleness and ownership rules need.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// An open pull request as listed by GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Title of the pull request.
    pub title: String,
    /// HTML URL for displaying to a user.
    pub html_url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether the pull request is still a draft.
    pub draft: bool,
    /// Label names in the order GitHub returned them.
    pub labels: Vec<String>,
    /// Assignee logins in the order GitHub returned them.
    pub assignees: Vec<String>,
    /// SHA of the head commit.
    pub head_sha: String,
}

impl PullRequest {
    /// Returns true when the pull request carries a label with exactly this
    /// name.
    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }

    /// Login of the first assignee, if any.
    #[must_use]
    pub fn first_assignee(&self) -> Option<&str> {
        self.assignees.first().map(String::as_str)
    }
}

/// Commit details needed to judge recency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA.
    pub sha: String,
    /// Committer timestamp.
    pub committer_date: DateTime<Utc>,
}

/// Pull request review comment (attached to a diff line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    /// Comment identifier.
    pub id: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Pull request issue comment (general discussion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment identifier.
    pub id: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Comment body.
    pub body: Option<String>,
}

/// Public profile of a GitHub user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Login handle.
    pub login: String,
    /// Display name, when the user has set one.
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) html_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) draft: Option<bool>,
    #[serde(default)]
    pub(crate) labels: Vec<ApiLabel>,
    #[serde(default)]
    pub(crate) assignees: Vec<ApiUser>,
    pub(crate) head: ApiHead,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabel {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiHead {
    pub(crate) sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommit {
    pub(crate) sha: String,
    pub(crate) commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitDetail {
    pub(crate) committer: ApiGitActor,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiGitActor {
    pub(crate) date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReviewComment {
    pub(crate) id: u64,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIssueComment {
    pub(crate) id: u64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUserProfile {
    pub(crate) login: String,
    pub(crate) name: Option<String>,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            title: value.title.unwrap_or_default(),
            html_url: value.html_url.unwrap_or_default(),
            created_at: value.created_at,
            draft: value.draft.unwrap_or(false),
            labels: value.labels.into_iter().map(|label| label.name).collect(),
            assignees: value
                .assignees
                .into_iter()
                .filter_map(|user| user.login)
                .collect(),
            head_sha: value.head.sha,
        }
    }
}

impl From<ApiCommit> for Commit {
    fn from(value: ApiCommit) -> Self {
        Self {
            sha: value.sha,
            committer_date: value.commit.committer.date,
        }
    }
}

impl From<ApiReviewComment> for ReviewComment {
    fn from(value: ApiReviewComment) -> Self {
        Self {
            id: value.id,
            created_at: value.created_at,
        }
    }
}

impl From<ApiIssueComment> for IssueComment {
    fn from(value: ApiIssueComment) -> Self {
        Self {
            id: value.id,
            created_at: value.created_at,
            body: value.body,
        }
    }
}

impl From<ApiUserProfile> for UserProfile {
    fn from(value: ApiUserProfile) -> Self {
        Self {
            login: value.login,
            display_name: value.name.filter(|name| !name.trim().is_empty()),
        }
    }
}
