//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.prmonitor.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRMONITOR_OWNER`, `PRMONITOR_TOKEN`, or
//!    `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--owner`/`-o`, `--token`/`-t`, …
//!
//! # Configuration File
//!
//! ```toml
//! owner = "dotnet"
//! repo = "aspnetcore"
//! base_branch = "main"
//! stale_days = 21
//! output = "reports/aspnetcore.html"
//! ```

use std::env;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::activity::Cutoff;
use crate::audit::AuditSettings;
use crate::github::{MonitorError, RepositoryLocator};

/// Default repository owner.
pub const DEFAULT_OWNER: &str = "dotnet";
/// Default repository name.
pub const DEFAULT_REPO: &str = "runtime";
/// Default GitHub web host.
pub const DEFAULT_SERVER: &str = "https://github.com";
/// Default base branch.
pub const DEFAULT_BASE_BRANCH: &str = "main";
/// Default trailing window in days.
pub const DEFAULT_STALE_DAYS: u32 = 21;
/// Default label a pull request must carry to be audited.
pub const DEFAULT_REQUIRED_LABEL: &str = "community-contribution";
/// Default label that excludes a pull request from the audit.
pub const DEFAULT_SKIP_LABEL: &str = "needs-author-action";

/// Application configuration supporting CLI, environment, and file sources.
///
/// Every field is optional; accessors supply the defaults.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use prmonitor::MonitorConfig;
///
/// let config = MonitorConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// let repo = config.repo().expect("valid repository");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRMONITOR",
    discovery(
        dotfile_name = ".prmonitor.toml",
        config_file_name = "prmonitor.toml",
        app_name = "prmonitor"
    )
)]
pub struct MonitorConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PRMONITOR_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository owner. Defaults to `dotnet`.
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name. Defaults to `runtime`.
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// GitHub web host; GitHub Enterprise hosts are served from `/api/v3`.
    #[ortho_config()]
    pub server: Option<String>,

    /// Base branch pull requests must target. Defaults to `main`.
    #[ortho_config(cli_short = 'b')]
    pub base_branch: Option<String>,

    /// Days without activity before a pull request is stale. Defaults to 21.
    #[ortho_config(cli_short = 'd')]
    pub stale_days: Option<u32>,

    /// Label a pull request must carry to be audited.
    #[ortho_config()]
    pub required_label: Option<String>,

    /// Label that excludes a pull request from the audit.
    #[ortho_config()]
    pub skip_label: Option<String>,

    /// URL of the markdown area-ownership document.
    ///
    /// Defaults to `docs/area-owners.md` on the base branch of the audited
    /// repository.
    #[ortho_config()]
    pub ownership_url: Option<String>,

    /// Path of a Jinja2 HTML template replacing the built-in report layout.
    #[ortho_config()]
    pub template: Option<String>,

    /// Report file path. Defaults to `output-<repo>.html`.
    #[ortho_config()]
    pub output: Option<String>,

    /// Emits JSONL telemetry to stderr.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so this is set with `--telemetry` or in a file.
    #[ortho_config()]
    pub telemetry: bool,
}

fn non_blank<'a>(
    value: Option<&'a str>,
    default: &'a str,
    field: &str,
) -> Result<&'a str, MonitorError> {
    let resolved = value.unwrap_or(default).trim();
    if resolved.is_empty() {
        return Err(MonitorError::Configuration {
            message: format!("{field} must not be blank"),
        });
    }
    Ok(resolved)
}

impl MonitorConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<String, MonitorError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
            .ok_or(MonitorError::MissingToken)
    }

    /// Repository owner.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when the owner is blank.
    pub fn owner(&self) -> Result<&str, MonitorError> {
        non_blank(self.owner.as_deref(), DEFAULT_OWNER, "owner")
    }

    /// Repository name.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when the name is blank.
    pub fn repo(&self) -> Result<&str, MonitorError> {
        non_blank(self.repo.as_deref(), DEFAULT_REPO, "repo")
    }

    /// GitHub web host.
    #[must_use]
    pub fn server(&self) -> &str {
        self.server.as_deref().unwrap_or(DEFAULT_SERVER)
    }

    /// Base branch filter.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when the branch is blank.
    pub fn base_branch(&self) -> Result<&str, MonitorError> {
        non_blank(self.base_branch.as_deref(), DEFAULT_BASE_BRANCH, "base_branch")
    }

    /// Trailing window in days.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when the window is zero.
    pub fn stale_days(&self) -> Result<u32, MonitorError> {
        match self.stale_days.unwrap_or(DEFAULT_STALE_DAYS) {
            0 => Err(MonitorError::Configuration {
                message: "stale_days must be at least 1".to_owned(),
            }),
            days => Ok(days),
        }
    }

    /// Cutoff for a report describing `today`.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when the window is zero.
    pub fn cutoff(&self, today: NaiveDate) -> Result<Cutoff, MonitorError> {
        Ok(Cutoff::days_before(today, self.stale_days()?))
    }

    /// Label a pull request must carry to be audited.
    #[must_use]
    pub fn required_label(&self) -> &str {
        self.required_label
            .as_deref()
            .unwrap_or(DEFAULT_REQUIRED_LABEL)
    }

    /// Label that excludes a pull request from the audit.
    #[must_use]
    pub fn skip_label(&self) -> &str {
        self.skip_label.as_deref().unwrap_or(DEFAULT_SKIP_LABEL)
    }

    /// Location of the area-ownership document.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when owner, repo or base
    /// branch is blank.
    pub fn ownership_url(&self) -> Result<String, MonitorError> {
        if let Some(url) = self.ownership_url.as_deref() {
            return non_blank(Some(url), "", "ownership_url").map(ToOwned::to_owned);
        }
        Ok(format!(
            "https://raw.githubusercontent.com/{}/{}/{}/docs/area-owners.md",
            self.owner()?,
            self.repo()?,
            self.base_branch()?
        ))
    }

    /// Path of the template override, if configured.
    #[must_use]
    pub fn template_path(&self) -> Option<&Utf8Path> {
        self.template.as_deref().map(Utf8Path::new)
    }

    /// Report file path.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when the repo is blank.
    pub fn output_path(&self) -> Result<Utf8PathBuf, MonitorError> {
        if let Some(output) = self.output.as_deref() {
            return non_blank(Some(output), "", "output").map(Utf8PathBuf::from);
        }
        Ok(Utf8PathBuf::from(format!("output-{}.html", self.repo()?)))
    }

    /// Locator of the audited repository.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] for blank owner or repo and
    /// [`MonitorError::InvalidUrl`] for an unparseable server.
    pub fn locator(&self) -> Result<RepositoryLocator, MonitorError> {
        RepositoryLocator::on_server(self.server(), self.owner()?, self.repo()?)
    }

    /// Audit settings for a report describing `today`.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Configuration`] when a value is invalid.
    pub fn audit_settings(&self, today: NaiveDate) -> Result<AuditSettings, MonitorError> {
        Ok(AuditSettings {
            base_branch: self.base_branch()?.to_owned(),
            required_label: self.required_label().to_owned(),
            skip_label: self.skip_label().to_owned(),
            ownership_url: self.ownership_url()?,
            today,
            cutoff: self.cutoff(today)?,
        })
    }
}
