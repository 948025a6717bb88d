//! Repository identity wrappers and REST path construction.

use url::Url;

use super::error::MonitorError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, MonitorError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MonitorError::MissingPathSegments);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, MonitorError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MonitorError::MissingPathSegments);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, MonitorError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MonitorError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Derives the GitHub API base URL from a parsed web URL.
///
/// `github.com` maps to the public API; any other host is treated as GitHub
/// Enterprise and served from `/api/v3` on the same authority.
fn derive_api_base(parsed: &Url) -> Result<Url, MonitorError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| MonitorError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse("https://api.github.com")
            .map_err(|error| MonitorError::InvalidUrl(error.to_string()));
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{}://{authority}", parsed.scheme()))
        .map_err(|error| MonitorError::InvalidUrl(error.to_string()))?;

    api_url
        .set_port(parsed.port())
        .map_err(|()| MonitorError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

/// Repository being audited, together with the API base that serves it.
///
/// # Example
///
/// ```
/// use prmonitor::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/dotnet/runtime")
///     .expect("should parse repository URL");
/// assert_eq!(locator.owner().as_str(), "dotnet");
/// assert_eq!(locator.repository().as_str(), "runtime");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for a repository hosted on `github.com`.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::MissingPathSegments` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, MonitorError> {
        Self::parse(&format!("https://github.com/{}/{}", owner.trim(), repo.trim()))
    }

    /// Creates a locator for a repository on the given web host, which may be
    /// `https://github.com` or a GitHub Enterprise server.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::InvalidUrl` when the server URL cannot be parsed
    /// and `MissingPathSegments` when owner or repo is empty.
    pub fn on_server(server: &str, owner: &str, repo: &str) -> Result<Self, MonitorError> {
        let base = server.trim().trim_end_matches('/');
        Self::parse(&format!("{base}/{}/{}", owner.trim(), repo.trim()))
    }

    /// Parses a repository URL in the form `https://<host>/<owner>/<repo>`.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::InvalidUrl` when parsing fails or
    /// `MissingPathSegments` when the URL path is not `/owner/repo`.
    pub fn parse(input: &str) -> Result<Self, MonitorError> {
        let parsed =
            Url::parse(input).map_err(|error| MonitorError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(MonitorError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(MonitorError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(MonitorError::MissingPathSegments)?;

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment)?;
        let api_base = derive_api_base(&parsed)?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// `owner/repo` form used in log lines and report headings.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }

    pub(crate) fn pulls_path(&self) -> String {
        format!("/repos/{}/pulls", self.full_name())
    }

    pub(crate) fn commit_path(&self, sha: &str) -> String {
        format!("/repos/{}/commits/{sha}", self.full_name())
    }

    pub(crate) fn review_comments_path(&self, number: u64) -> String {
        format!("/repos/{}/pulls/{number}/comments", self.full_name())
    }

    pub(crate) fn issue_comments_path(&self, number: u64) -> String {
        format!("/repos/{}/issues/{number}/comments", self.full_name())
    }
}

pub(crate) fn user_path(login: &str) -> String {
    format!("/users/{login}")
}
