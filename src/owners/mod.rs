//! Scope label ownership.
//!
//! [`OwnerDirectory`] maps scope labels (`area-*`, `arch-*`, `os-*`) to owner
//! aliases and aliases to display names. It starts from an explicit
//! [`OwnerSeed`] and is supplemented by ingesting the repository's markdown
//! ownership document. Keys are compared case-insensitively and existing
//! mappings are never overwritten, so ingesting the same document twice
//! leaves the directory unchanged.
//!
//! Gaps in the data are not errors: they are logged with `tracing` and
//! resolve to sentinel values.

mod dialect;
mod seed;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

pub use dialect::{ParsedRow, TableDialect};
pub use seed::OwnerSeed;

/// Display name used when a scope label has no owner mapping.
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Scope prefixes extracted from ownership documents, in ingestion order.
pub const OWNERSHIP_PREFIXES: [&str; 3] = ["area-", "arch-", "os-"];

/// Counts of what one [`OwnerDirectory::ingest`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// New scope label mappings added.
    pub added: usize,
    /// Rows whose scope label was already mapped.
    pub duplicates: usize,
    /// Rows that could not be parsed or had no owner.
    pub rejected: usize,
}

#[derive(Debug, Clone)]
struct Lead {
    label: String,
    alias: String,
}

/// Case-insensitive scope label to owner directory.
#[derive(Debug, Clone, Default)]
pub struct OwnerDirectory {
    leads: HashMap<String, Lead>,
    names: HashMap<String, String>,
}

fn key(value: &str) -> String {
    value.trim().to_lowercase()
}

impl OwnerDirectory {
    /// Builds a directory holding only the seed entries.
    ///
    /// Duplicate seed labels are logged and the first mapping wins.
    #[must_use]
    pub fn bootstrap(seed: &OwnerSeed) -> Self {
        let mut directory = Self::default();
        for (label, alias) in &seed.leads {
            directory.insert_lead(label, alias);
        }
        for (alias, name) in &seed.names {
            directory
                .names
                .entry(key(alias))
                .or_insert_with(|| name.clone());
        }
        directory
    }

    /// Merges owner assignments from a markdown ownership document.
    ///
    /// Each prefix is probed for its [`TableDialect`]; prefixes with no rows
    /// in either dialect are skipped. Malformed rows, rows without an owner
    /// and duplicate scope labels are logged and counted, never fatal.
    pub fn ingest(&mut self, document: &str, prefixes: &[&str]) -> IngestSummary {
        let mut summary = IngestSummary::default();

        for prefix in prefixes {
            let Some(dialect) = TableDialect::detect(document, prefix) else {
                tracing::debug!(prefix, "ownership document has no rows for prefix");
                continue;
            };

            for row in dialect.parse_rows(document, prefix) {
                match row {
                    ParsedRow::Entry { scope, alias } => {
                        if self.insert_lead(&scope, &alias) {
                            summary.added += 1;
                        } else {
                            summary.duplicates += 1;
                        }
                    }
                    ParsedRow::Malformed => {
                        tracing::warn!(prefix, "unexpected leads format");
                        summary.rejected += 1;
                    }
                    ParsedRow::MissingOwner { scope } => {
                        tracing::warn!(scope = %scope, "could not extract lead");
                        summary.rejected += 1;
                    }
                }
            }
        }

        summary
    }

    fn insert_lead(&mut self, label: &str, alias: &str) -> bool {
        match self.leads.entry(key(label)) {
            Entry::Occupied(existing) => {
                tracing::warn!(
                    scope = label,
                    kept = %existing.get().alias,
                    ignored = alias,
                    "duplicate area lead"
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(Lead {
                    label: label.trim().to_owned(),
                    alias: alias.trim().to_owned(),
                });
                true
            }
        }
    }

    /// Returns true when the scope label has an owner alias.
    #[must_use]
    pub fn contains(&self, scope_label: &str) -> bool {
        self.leads.contains_key(&key(scope_label))
    }

    /// Owner alias for a scope label.
    #[must_use]
    pub fn alias_for(&self, scope_label: &str) -> Option<&str> {
        self.leads
            .get(&key(scope_label))
            .map(|lead| lead.alias.as_str())
    }

    /// Display name registered for an owner alias.
    #[must_use]
    pub fn display_name(&self, alias: &str) -> Option<&str> {
        self.names.get(&key(alias)).map(String::as_str)
    }

    /// Number of scope labels with an owner.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    /// Returns true when no scope label has an owner.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Scope labels with an owner, in their original spelling, sorted.
    #[must_use]
    pub fn scope_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.leads.values().map(|lead| lead.label.as_str()).collect();
        labels.sort_unstable();
        labels
    }

    /// Resolves the display name of the owner of a scope label.
    ///
    /// Returns [`UNKNOWN_OWNER`] when the label has no alias and the alias
    /// itself when it has no display name; both cases are logged.
    #[must_use]
    pub fn resolve_owner(&self, scope_label: &str) -> String {
        let Some(alias) = self.alias_for(scope_label) else {
            tracing::warn!(scope = scope_label, "missing lead for scope");
            return UNKNOWN_OWNER.to_owned();
        };

        self.display_name(alias).map_or_else(
            || {
                tracing::warn!(alias, "missing lead alias mapping");
                alias.to_owned()
            },
            ToOwned::to_owned,
        )
    }
}
