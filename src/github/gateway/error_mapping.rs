//! Error mapping helpers for the GitHub gateway implementations.

use http::StatusCode;

use crate::github::error::MonitorError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> MonitorError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(operation, source.status_code, Some(source.message.clone()));
    }

    if is_network_error(error) {
        return MonitorError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    MonitorError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> MonitorError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        MonitorError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else {
        MonitorError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

pub(super) fn map_reqwest_error(operation: &str, error: &reqwest::Error) -> MonitorError {
    match error.status() {
        Some(status) => map_http_error(operation, status, Some(error.to_string())),
        None => MonitorError::Network {
            message: format!("{operation} failed: {error}"),
        },
    }
}
