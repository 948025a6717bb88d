//! GitHub API quota snapshots.
//!
//! An audit issues up to three requests per audited pull request plus one
//! per distinct assignee, so the quota is checked once the listing is known
//! and attached to [`MonitorError::RateLimitExceeded`](super::MonitorError)
//! when GitHub refuses a request.

use chrono::{DateTime, Utc};

/// Requests the activity checks may issue for one pull request.
pub const REQUESTS_PER_PULL_REQUEST: u32 = 3;

/// Quota of the authenticated token.
///
/// # Example
///
/// ```
/// use prmonitor::github::rate_limit::RateLimitInfo;
///
/// let quota = RateLimitInfo::new(5000, 120, 1_742_630_400);
/// assert!(quota.covers(40));
/// assert!(!quota.covers(41));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    limit: u32,
    remaining: u32,
    reset_at: u64,
}

impl RateLimitInfo {
    /// Snapshot with `remaining` of `limit` requests left until the Unix
    /// second `reset_at`.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Requests allowed per window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Requests left in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Unix second at which the window resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Reset instant, when representable.
    #[must_use]
    pub fn reset_time(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.reset_at)
            .ok()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
    }

    /// True when the remaining quota is enough to inspect `pull_requests`
    /// pull requests.
    #[must_use]
    pub const fn covers(&self, pull_requests: u32) -> bool {
        pull_requests.saturating_mul(REQUESTS_PER_PULL_REQUEST) <= self.remaining
    }
}
