//! Octocrab client construction for the pull request gateway.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::MonitorError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};

use super::error_mapping::map_octocrab_error;

/// Builds an authenticated client rooted at the API base of `locator`.
///
/// # Errors
///
/// Returns `MonitorError::InvalidUrl` when the API base is not a valid URI
/// and `MonitorError::Api` when Octocrab rejects the configuration.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    locator: &RepositoryLocator,
) -> Result<Octocrab, MonitorError> {
    let api_base = locator.api_base().as_str();
    let base_uri = api_base
        .parse::<Uri>()
        .map_err(|error| MonitorError::InvalidUrl(format!("{api_base}: {error}")))?;

    let builder = Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| MonitorError::Api {
            message: format!("configure client for {api_base} failed: {error}"),
        })?;
    tracing::debug!(api_base, repository = %locator.full_name(), "built GitHub client");

    builder
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
