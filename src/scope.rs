//! Selection of the single scope label that governs a pull request.

use std::fmt;

use crate::github::PullRequest;
use crate::owners::OwnerDirectory;

/// Recognised scope label prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopePrefix {
    /// `arch-*` labels.
    Arch,
    /// `os-*` labels.
    Os,
    /// `area-*` labels.
    Area,
}

impl ScopePrefix {
    /// Prefixes in the order they are consulted; earlier entries win.
    pub const PRIORITY: [Self; 3] = [Self::Arch, Self::Os, Self::Area];

    /// The prefix text including the trailing dash.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arch => "arch-",
            Self::Os => "os-",
            Self::Area => "area-",
        }
    }

    /// Returns true when `label` starts with this prefix, ignoring ASCII case.
    #[must_use]
    pub fn matches(self, label: &str) -> bool {
        let prefix = self.as_str();
        label
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }
}

impl fmt::Display for ScopePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scope label chosen for a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeLabel {
    prefix: ScopePrefix,
    label: String,
}

impl ScopeLabel {
    /// The prefix the label matched.
    #[must_use]
    pub const fn prefix(&self) -> ScopePrefix {
        self.prefix
    }

    /// The full label, e.g. `arch-arm64`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label with its prefix stripped, e.g. `arm64`.
    #[must_use]
    pub fn value(&self) -> &str {
        self.label
            .split_once('-')
            .map_or(self.label.as_str(), |(_, value)| value)
    }
}

impl fmt::Display for ScopeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Picks the governing scope label of pull requests.
///
/// Prefixes are tried in [`ScopePrefix::PRIORITY`] order. Within a prefix the
/// first label that has an owner mapping is kept; labels without a mapping
/// are skipped and later matching labels are reported as ambiguous.
#[derive(Debug, Clone, Copy)]
pub struct ScopeResolver<'a> {
    directory: &'a OwnerDirectory,
}

impl<'a> ScopeResolver<'a> {
    /// Creates a resolver backed by `directory`.
    #[must_use]
    pub const fn new(directory: &'a OwnerDirectory) -> Self {
        Self { directory }
    }

    /// Resolves the scope of `pull_request`, or `None` when no prefix yields
    /// a mapped label.
    #[must_use]
    pub fn resolve(&self, pull_request: &PullRequest) -> Option<ScopeLabel> {
        let resolved = ScopePrefix::PRIORITY
            .into_iter()
            .find_map(|prefix| self.resolve_prefix(pull_request, prefix));

        if resolved.is_none() {
            tracing::warn!(
                pull_request = pull_request.number,
                url = %pull_request.html_url,
                "missing scope label"
            );
        }
        resolved
    }

    fn resolve_prefix(&self, pull_request: &PullRequest, prefix: ScopePrefix) -> Option<ScopeLabel> {
        let mut found: Option<&str> = None;

        for label in pull_request
            .labels
            .iter()
            .filter(|label| prefix.matches(label))
        {
            if let Some(kept) = found {
                tracing::warn!(
                    pull_request = pull_request.number,
                    %prefix,
                    kept,
                    ignored = %label,
                    "ambiguous scope: multiple labels with the same prefix"
                );
                continue;
            }

            if !self.directory.contains(label) {
                tracing::warn!(
                    pull_request = pull_request.number,
                    label = %label,
                    "missing lead mapping"
                );
                continue;
            }

            found = Some(label);
        }

        found.map(|label| ScopeLabel {
            prefix,
            label: label.to_owned(),
        })
    }
}
