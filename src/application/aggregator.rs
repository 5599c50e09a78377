//! Severity aggregation: category buckets and severity counters

use std::collections::HashMap;

use crate::domain::report::{CategoryGroup, Issue, SeverityCounts, Statistics};

/// Result of aggregating an issue snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Category buckets in first-seen order; every issue lands in exactly one
    pub by_category: Vec<CategoryGroup>,
    /// Counters over the three recognized severities only
    pub severity: SeverityCounts,
}

/// Bucket issues by category and count recognized severities.
///
/// The category is the prefix of the issue kind before the first `_` (the
/// whole string when no delimiter exists). An issue with an unrecognized
/// severity value stays in its category bucket but is excluded from the
/// severity counters; this asymmetry comes from the original analyzer
/// contract and is preserved, not corrected.
pub fn aggregate(issues: &[Issue]) -> Aggregation {
    let mut index_by_category: HashMap<String, usize> = HashMap::new();
    let mut by_category: Vec<CategoryGroup> = Vec::new();
    let mut severity = SeverityCounts::default();

    for issue in issues {
        let category = issue.category();
        match index_by_category.get(category.as_str()) {
            Some(&idx) => by_category[idx].issues.push(issue.clone()),
            None => {
                index_by_category.insert(category.as_str().to_string(), by_category.len());
                by_category.push(CategoryGroup {
                    category,
                    issues: vec![issue.clone()],
                });
            }
        }

        if let Some(recognized) = issue.recognized_severity() {
            severity.record(recognized);
        }
    }

    Aggregation {
        by_category,
        severity,
    }
}

/// Derive full snapshot statistics from an issue list.
///
/// `total_issues_count` counts every issue, including those with
/// unrecognized severities, so the severity counters may sum to less than
/// the total.
pub fn compute_statistics(issues: &[Issue]) -> Statistics {
    let severity = aggregate(issues).severity;
    Statistics {
        total_issues_count: issues.len(),
        severity,
        auto_fixable_count: issues.iter().filter(|i| i.auto_fixable).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::Category;

    fn issue(kind: &str, severity: &str, auto_fixable: bool) -> Issue {
        Issue {
            kind: kind.to_string(),
            description: "desc".to_string(),
            location: "p.1".to_string(),
            severity: severity.to_string(),
            auto_fixable,
        }
    }

    #[test]
    fn test_aggregate_buckets_by_prefix() {
        let issues = vec![
            issue("font_size", "high", true),
            issue("font_name", "low", false),
            issue("margins_left", "medium", false),
        ];

        let agg = aggregate(&issues);
        assert_eq!(agg.by_category.len(), 2);
        assert_eq!(agg.by_category[0].category, Category::Font);
        assert_eq!(agg.by_category[0].issues.len(), 2);
        assert_eq!(agg.by_category[1].category, Category::Margins);
    }

    #[test]
    fn test_aggregate_counts_recognized_severities() {
        let issues = vec![
            issue("font_size", "high", true),
            issue("font_size", "high", true),
            issue("margins_left", "medium", false),
        ];

        let agg = aggregate(&issues);
        assert_eq!(agg.severity.high, 2);
        assert_eq!(agg.severity.medium, 1);
        assert_eq!(agg.severity.low, 0);
    }

    #[test]
    fn test_unrecognized_severity_is_bucketed_but_not_counted() {
        let issues = vec![
            issue("font_size", "critical", false),
            issue("font_size", "high", false),
        ];

        let agg = aggregate(&issues);
        assert_eq!(agg.by_category[0].issues.len(), 2);
        assert_eq!(agg.severity.recognized_total(), 1);
    }

    #[test]
    fn test_kind_without_delimiter_is_its_own_category() {
        let issues = vec![issue("watermark", "low", false)];
        let agg = aggregate(&issues);
        assert_eq!(
            agg.by_category[0].category,
            Category::Other("watermark".to_string())
        );
    }

    #[test]
    fn test_compute_statistics() {
        let issues = vec![
            issue("font_size", "high", true),
            issue("margins_left", "odd", true),
            issue("line_spacing", "low", false),
        ];

        let stats = compute_statistics(&issues);
        assert_eq!(stats.total_issues_count, 3);
        assert_eq!(stats.auto_fixable_count, 2);
        // "odd" is retained in the total but absent from severity counters.
        assert_eq!(stats.severity.recognized_total(), 2);
    }
}
