//! Issue normalization: deduplication of identical issues across locations

use std::collections::HashMap;

use tracing::debug;

use crate::domain::report::{GroupedIssue, Issue};

/// Group identical issues, preserving first-seen order.
///
/// Identity is `kind + "|" + description`, exact and case-sensitive. The
/// first occurrence of a key becomes the representative issue; every further
/// match increments the count and appends its location (duplicates allowed,
/// arrival order preserved). No issue is ever dropped, so
/// `sum(count) == issues.len()`.
pub fn group_issues(issues: &[Issue]) -> Vec<GroupedIssue> {
    let mut index_by_key: HashMap<String, usize> = HashMap::with_capacity(issues.len());
    let mut groups: Vec<GroupedIssue> = Vec::new();

    for issue in issues {
        let key = issue.group_key();
        match index_by_key.get(&key) {
            Some(&idx) => {
                let group = &mut groups[idx];
                group.count += 1;
                group.locations.push(issue.location.clone());
            }
            None => {
                index_by_key.insert(key, groups.len());
                groups.push(GroupedIssue {
                    issue: issue.clone(),
                    count: 1,
                    locations: vec![issue.location.clone()],
                });
            }
        }
    }

    debug!(
        total = issues.len(),
        groups = groups.len(),
        "Grouped issues"
    );

    groups
}

/// Expand grouped issues back into a flat list, one issue per location.
///
/// Regrouping the flattened list reproduces the same groups, which keeps
/// `group_issues` idempotent under round-trip.
pub fn flatten_groups(groups: &[GroupedIssue]) -> Vec<Issue> {
    groups
        .iter()
        .flat_map(|group| {
            group.locations.iter().map(|location| {
                let mut issue = group.issue.clone();
                issue.location = location.clone();
                issue
            })
        })
        .collect()
}
