//! Error types exposed by the GitHub provider layer and the audit pipeline.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while configuring a run or communicating with GitHub.
///
/// Every variant is fatal for an audit run: mapping gaps in the ownership
/// data are logged rather than returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MonitorError {
    /// The provided URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository owner or name is missing.
    #[error("repository must be given as <owner>/<repo>")]
    MissingPathSegments,

    /// Neither configuration nor `GITHUB_TOKEN` supplied a token.
    #[error("a GitHub token is required (--token, PRMONITOR_TOKEN or GITHUB_TOKEN)")]
    MissingToken,

    /// GitHub answered 401 or 403 without a rate limit message.
    #[error("GitHub refused the token: {message}")]
    Authentication {
        /// Message returned with the refusal.
        message: String,
    },

    /// A GitHub or ownership document request failed with another status.
    #[error("GitHub API error: {message}")]
    Api {
        /// Operation and status detail.
        message: String,
    },

    /// The request never produced a response.
    #[error("network error: {message}")]
    Network {
        /// Transport error detail.
        message: String,
    },

    /// GitHub refused a request because the token ran out of quota.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Quota snapshot fetched after the refusal, when GitHub still answered.
        rate_limit: Option<RateLimitInfo>,
        /// Operation and GitHub message, with the reset time when known.
        message: String,
    },

    /// A template or report file could not be read or written.
    #[error("I/O error: {message}")]
    Io {
        /// Path and operating system detail.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The report template could not be compiled or rendered.
    #[error("report template error: {message}")]
    Template {
        /// Details reported by the template engine.
        message: String,
    },
}
