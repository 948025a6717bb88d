//! Active versus stale classification of pull requests.
//!
//! [`ActivityEvaluator::classify`] checks, in a fixed order, whether a pull
//! request was created after the cutoff, has a head commit after it, has a
//! review comment after it, or has a relevant issue comment after it. The
//! first check that succeeds decides the outcome and the remaining data is
//! never fetched.
//!
//! When a comment makes the pull request active, the exact activity date is
//! not computed; [`UNKNOWN_RECENT_ACTIVITY`] is reported instead.

mod relevance;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::github::{MonitorError, PullRequest, PullRequestGateway, RepositoryLocator};

pub use relevance::{is_relevant, is_relevant_body};

/// Reported activity date of pull requests kept active by a recent comment.
pub const UNKNOWN_RECENT_ACTIVITY: NaiveDate = NaiveDate::MAX;

/// Activity date of stale pull requests with no comments and no commit date.
pub const NO_RECORDED_ACTIVITY: NaiveDate = NaiveDate::MIN;

/// The last day of the trailing window that does not count as recent.
///
/// Activity strictly after this day makes a pull request active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff {
    date: NaiveDate,
}

impl Cutoff {
    /// Cutoff for a window of `stale_days` days ending `today`.
    ///
    /// Saturates at the earliest representable date.
    #[must_use]
    pub fn days_before(today: NaiveDate, stale_days: u32) -> Self {
        Self {
            date: today
                .checked_sub_days(Days::new(u64::from(stale_days)))
                .unwrap_or(NaiveDate::MIN),
        }
    }

    /// Cutoff on an explicit day.
    #[must_use]
    pub const fn on(date: NaiveDate) -> Self {
        Self { date }
    }

    /// The cutoff day.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.date
    }

    /// Start of the cutoff day in UTC.
    #[must_use]
    pub fn midnight(self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }

    /// Returns true when a calendar day falls after the cutoff.
    #[must_use]
    pub fn is_after(self, day: NaiveDate) -> bool {
        day > self.date
    }

    /// Returns true when a timestamp falls after the start of the cutoff day.
    #[must_use]
    pub fn is_after_instant(self, instant: DateTime<Utc>) -> bool {
        instant > self.midnight()
    }
}

/// What made a pull request active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityTrigger {
    /// Created after the cutoff.
    Created,
    /// Head commit after the cutoff.
    Commit,
    /// A review comment after the cutoff.
    ReviewComment,
    /// A relevant issue comment after the cutoff.
    IssueComment,
}

/// Outcome of classifying one pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Recent activity exists.
    Active {
        /// The check that succeeded.
        trigger: ActivityTrigger,
        /// Day of the activity, or [`UNKNOWN_RECENT_ACTIVITY`] for comments.
        last_activity: NaiveDate,
    },
    /// No activity after the cutoff.
    Stale {
        /// Most recent qualifying activity, never after the cutoff.
        last_activity: NaiveDate,
    },
}

impl Classification {
    /// Returns true for [`Classification::Stale`].
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    /// The reported last activity day.
    #[must_use]
    pub const fn last_activity(&self) -> NaiveDate {
        match *self {
            Self::Active { last_activity, .. } | Self::Stale { last_activity } => last_activity,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Active { trigger, .. } => match trigger {
                ActivityTrigger::Created => "created",
                ActivityTrigger::Commit => "commit",
                ActivityTrigger::ReviewComment => "review comment",
                ActivityTrigger::IssueComment => "issue comment",
            },
            Self::Stale { .. } => "stale",
        }
    }
}

/// Classifies pull requests of one repository against a cutoff.
pub struct ActivityEvaluator<'a, G: ?Sized> {
    gateway: &'a G,
    locator: &'a RepositoryLocator,
    cutoff: Cutoff,
}

impl<'a, G> ActivityEvaluator<'a, G>
where
    G: PullRequestGateway + ?Sized,
{
    /// Creates an evaluator reading activity through `gateway`.
    #[must_use]
    pub const fn new(gateway: &'a G, locator: &'a RepositoryLocator, cutoff: Cutoff) -> Self {
        Self {
            gateway,
            locator,
            cutoff,
        }
    }

    /// The cutoff in use.
    #[must_use]
    pub const fn cutoff(&self) -> Cutoff {
        self.cutoff
    }

    /// Classifies a non-draft pull request.
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged when a fetch fails.
    pub async fn classify(
        &self,
        pull_request: &PullRequest,
    ) -> Result<Classification, MonitorError> {
        let created = pull_request.created_at.date_naive();
        if self.cutoff.is_after(created) {
            return Ok(Classification::Active {
                trigger: ActivityTrigger::Created,
                last_activity: created,
            });
        }

        let commit = self
            .gateway
            .commit(self.locator, &pull_request.head_sha)
            .await?;
        let committed = commit.committer_date.date_naive();
        if self.cutoff.is_after(committed) {
            return Ok(Classification::Active {
                trigger: ActivityTrigger::Commit,
                last_activity: committed,
            });
        }

        let review_comments = self
            .gateway
            .review_comments(self.locator, pull_request.number)
            .await?;
        if review_comments
            .iter()
            .any(|comment| self.cutoff.is_after_instant(comment.created_at))
        {
            return Ok(Classification::Active {
                trigger: ActivityTrigger::ReviewComment,
                last_activity: UNKNOWN_RECENT_ACTIVITY,
            });
        }

        let issue_comments = self
            .gateway
            .issue_comments(self.locator, pull_request.number)
            .await?;
        let relevant: Vec<DateTime<Utc>> = issue_comments
            .iter()
            .filter(|comment| is_relevant(comment))
            .map(|comment| comment.created_at)
            .collect();
        if relevant
            .iter()
            .any(|created_at| self.cutoff.is_after_instant(*created_at))
        {
            return Ok(Classification::Active {
                trigger: ActivityTrigger::IssueComment,
                last_activity: UNKNOWN_RECENT_ACTIVITY,
            });
        }

        let last_comment = relevant
            .into_iter()
            .chain(review_comments.iter().map(|comment| comment.created_at))
            .map(|created_at| created_at.date_naive())
            .max()
            .unwrap_or(NO_RECORDED_ACTIVITY);

        Ok(Classification::Stale {
            last_activity: last_comment.max(committed),
        })
    }
}
