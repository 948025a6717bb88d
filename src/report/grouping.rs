//! Grouping of stale pull requests by owner.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::github::PullRequest;
use crate::owners::OwnerDirectory;
use crate::scope::{ScopeLabel, ScopeResolver};

/// A pull request classified as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StalePullRequest {
    /// The pull request.
    pub pull_request: PullRequest,
    /// Most recent qualifying activity.
    pub last_activity: NaiveDate,
}

/// A stale pull request attributed to an owner through its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedItem {
    /// The pull request.
    pub pull_request: PullRequest,
    /// Most recent qualifying activity.
    pub last_activity: NaiveDate,
    /// Governing scope label.
    pub scope: ScopeLabel,
}

/// Stale pull requests sharing one owner, oldest activity first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    /// Owner display name, or [`UNKNOWN_OWNER`](crate::owners::UNKNOWN_OWNER).
    pub owner: String,
    /// Items ordered by ascending last activity.
    pub items: Vec<GroupedItem>,
}

impl ReportGroup {
    fn oldest_activity(&self) -> Option<NaiveDate> {
        self.items.first().map(|item| item.last_activity)
    }
}

/// Output of [`ReportGrouper::group`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    /// Ordered owner groups.
    pub groups: Vec<ReportGroup>,
    /// Stale pull requests without a resolvable scope, in input order.
    pub unscoped: Vec<StalePullRequest>,
}

impl Grouping {
    /// Number of grouped pull requests.
    #[must_use]
    pub fn grouped_len(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}

/// Groups stale pull requests by the owner of their scope.
#[derive(Debug, Clone, Copy)]
pub struct ReportGrouper<'a> {
    directory: &'a OwnerDirectory,
}

impl<'a> ReportGrouper<'a> {
    /// Creates a grouper resolving scopes and owners through `directory`.
    #[must_use]
    pub const fn new(directory: &'a OwnerDirectory) -> Self {
        Self { directory }
    }

    /// Groups `stale` pull requests.
    ///
    /// Groups are ordered by descending size, then by the ascending last
    /// activity of their oldest item; equal groups keep the order in which
    /// their owners first appeared. Items within a group are ordered by
    /// ascending last activity, keeping input order for equal days.
    #[must_use]
    pub fn group(&self, stale: Vec<StalePullRequest>) -> Grouping {
        let resolver = ScopeResolver::new(self.directory);
        let mut groups: Vec<ReportGroup> = Vec::new();
        let mut index_by_owner: HashMap<String, usize> = HashMap::new();
        let mut unscoped = Vec::new();

        for entry in stale {
            let Some(scope) = resolver.resolve(&entry.pull_request) else {
                unscoped.push(entry);
                continue;
            };

            let owner = self.directory.resolve_owner(scope.label());
            let item = GroupedItem {
                pull_request: entry.pull_request,
                last_activity: entry.last_activity,
                scope,
            };

            let position = *index_by_owner.entry(owner.clone()).or_insert_with(|| {
                groups.push(ReportGroup {
                    owner,
                    items: Vec::new(),
                });
                groups.len() - 1
            });
            if let Some(group) = groups.get_mut(position) {
                group.items.push(item);
            }
        }

        for group in &mut groups {
            group.items.sort_by_key(|item| item.last_activity);
        }
        groups.sort_by(|left, right| {
            right
                .items
                .len()
                .cmp(&left.items.len())
                .then_with(|| left.oldest_activity().cmp(&right.oldest_activity()))
        });

        Grouping { groups, unscoped }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::{Grouping, ReportGrouper, StalePullRequest};
    use crate::github::models::test_support::{PullRequestBuilder, day};
    use crate::owners::{OwnerDirectory, OwnerSeed, UNKNOWN_OWNER};

    #[fixture]
    fn directory() -> OwnerDirectory {
        let seed = OwnerSeed::empty()
            .with_lead("area-System.Net", "@karelz")
            .with_lead("area-System.Net.Http", "@karelz")
            .with_lead("area-JIT", "@agocke")
            .with_lead("os-linux", "@jeffhandley")
            .with_lead("area-Meta", "@unnamed")
            .with_name("@karelz", "Karel Zikmund")
            .with_name("@agocke", "Andy Gocke")
            .with_name("@jeffhandley", "Jeff Handley");
        OwnerDirectory::bootstrap(&seed)
    }

    fn stale(number: u64, label: &str, last_activity: NaiveDate) -> StalePullRequest {
        StalePullRequest {
            pull_request: PullRequestBuilder::new(number).label(label).build(),
            last_activity,
        }
    }

    fn summary(grouping: &Grouping) -> Vec<(String, Vec<u64>)> {
        grouping
            .groups
            .iter()
            .map(|group| {
                (
                    group.owner.clone(),
                    group
                        .items
                        .iter()
                        .map(|item| item.pull_request.number)
                        .collect(),
                )
            })
            .collect()
    }

    #[rstest]
    fn larger_group_precedes_and_items_sort_oldest_first(directory: OwnerDirectory) {
        let input = vec![
            stale(1, "area-JIT", day(2025, 1, 5)),
            stale(2, "area-System.Net", day(2025, 2, 10)),
            stale(3, "area-System.Net.Http", day(2024, 12, 1)),
            stale(4, "area-System.Net", day(2025, 1, 20)),
        ];

        let grouping = ReportGrouper::new(&directory).group(input);

        assert_eq!(
            summary(&grouping),
            vec![
                ("Karel Zikmund".to_owned(), vec![3, 4, 2]),
                ("Andy Gocke".to_owned(), vec![1]),
            ]
        );
    }

    #[rstest]
    fn equal_sized_groups_order_by_oldest_item(directory: OwnerDirectory) {
        let input = vec![
            stale(1, "area-JIT", day(2025, 1, 5)),
            stale(2, "os-linux", day(2024, 6, 1)),
            stale(3, "area-System.Net", day(2024, 9, 1)),
        ];

        let grouping = ReportGrouper::new(&directory).group(input);

        let owners: Vec<&str> = grouping.groups.iter().map(|g| g.owner.as_str()).collect();
        assert_eq!(owners, vec!["Jeff Handley", "Karel Zikmund", "Andy Gocke"]);
    }

    #[rstest]
    fn full_ties_keep_first_appearance_order(directory: OwnerDirectory) {
        let input = vec![
            stale(1, "area-JIT", day(2025, 1, 5)),
            stale(2, "os-linux", day(2025, 1, 5)),
            stale(3, "os-linux", day(2025, 1, 9)),
            stale(4, "area-JIT", day(2025, 1, 7)),
        ];

        let grouping = ReportGrouper::new(&directory).group(input);

        assert_eq!(
            summary(&grouping),
            vec![
                ("Andy Gocke".to_owned(), vec![1, 4]),
                ("Jeff Handley".to_owned(), vec![2, 3]),
            ]
        );
    }

    #[rstest]
    fn unscoped_pull_requests_are_set_aside(directory: OwnerDirectory) {
        let input = vec![
            stale(1, "area-JIT", day(2025, 1, 5)),
            stale(2, "area-Unmapped", day(2025, 1, 6)),
            stale(3, "community-contribution", day(2025, 1, 7)),
        ];

        let grouping = ReportGrouper::new(&directory).group(input);

        assert_eq!(grouping.grouped_len(), 1);
        let unscoped: Vec<u64> = grouping
            .unscoped
            .iter()
            .map(|entry| entry.pull_request.number)
            .collect();
        assert_eq!(unscoped, vec![2, 3]);
    }

    #[rstest]
    fn alias_without_display_name_forms_its_own_group(directory: OwnerDirectory) {
        let grouping =
            ReportGrouper::new(&directory).group(vec![stale(9, "area-Meta", day(2025, 1, 1))]);

        assert_eq!(summary(&grouping), vec![("@unnamed".to_owned(), vec![9])]);
        assert_ne!(grouping.groups.first().map(|g| g.owner.as_str()), Some(UNKNOWN_OWNER));
    }

    #[rstest]
    fn empty_input_yields_empty_grouping(directory: OwnerDirectory) {
        assert_eq!(ReportGrouper::new(&directory).group(Vec::new()), Grouping::default());
    }
}
