//! Test helpers for constructing pull request and comment fixtures.
//!
//! # Examples
//!
//! ```
//! use prmonitor::github::models::test_support::{PullRequestBuilder, utc};
//!
//! let pull_request = PullRequestBuilder::new(7)
//!     .created_at(utc(2025, 1, 2))
//!     .label("area-System.Net")
//!     .build();
//! assert_eq!(pull_request.number, 7);
//! assert!(pull_request.has_label("area-System.Net"));
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::{Commit, IssueComment, PullRequest, ReviewComment};

/// Midnight UTC on the given calendar day.
///
/// # Panics
///
/// Panics when the date is not a valid calendar day.
#[must_use]
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

/// Calendar day helper for fixtures.
///
/// # Panics
///
/// Panics when the date is not a valid calendar day.
#[must_use]
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

/// Builder for [`PullRequest`] fixtures with a fluent API.
#[must_use]
#[derive(Debug, Clone)]
pub struct PullRequestBuilder {
    inner: PullRequest,
}

impl PullRequestBuilder {
    /// Starts a non-draft pull request with a deterministic title, URL and
    /// head SHA, created on 2025-01-01.
    pub fn new(number: u64) -> Self {
        Self {
            inner: PullRequest {
                number,
                title: format!("Pull request {number}"),
                html_url: format!("https://github.com/dotnet/runtime/pull/{number}"),
                created_at: utc(2025, 1, 1),
                draft: false,
                labels: Vec::new(),
                assignees: Vec::new(),
                head_sha: format!("sha{number}"),
            },
        }
    }

    /// Sets the title.
    pub fn title(mut self, title: &str) -> Self {
        self.inner.title = title.to_owned();
        self
    }

    /// Sets the creation timestamp.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.inner.created_at = created_at;
        self
    }

    /// Marks the pull request as a draft.
    pub fn draft(mut self) -> Self {
        self.inner.draft = true;
        self
    }

    /// Appends a label.
    pub fn label(mut self, name: &str) -> Self {
        self.inner.labels.push(name.to_owned());
        self
    }

    /// Appends an assignee login.
    pub fn assignee(mut self, login: &str) -> Self {
        self.inner.assignees.push(login.to_owned());
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> PullRequest {
        self.inner
    }
}

/// Commit fixture committed at `committer_date`.
#[must_use]
pub fn commit_at(sha: &str, committer_date: DateTime<Utc>) -> Commit {
    Commit {
        sha: sha.to_owned(),
        committer_date,
    }
}

/// Review comment fixture created at `created_at`.
#[must_use]
pub const fn review_comment_at(id: u64, created_at: DateTime<Utc>) -> ReviewComment {
    ReviewComment { id, created_at }
}

/// Issue comment fixture with the given body, created at `created_at`.
#[must_use]
pub fn issue_comment_at(id: u64, body: &str, created_at: DateTime<Utc>) -> IssueComment {
    IssueComment {
        id,
        created_at,
        body: Some(body.to_owned()),
    }
}
