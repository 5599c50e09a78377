//! Report assembly: derives the full immutable snapshot for an issue list

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::application::aggregator::{aggregate, compute_statistics};
use crate::application::grading::compute_grade;
use crate::application::normalizer::group_issues;
use crate::domain::report::{Issue, Report};

/// Build a complete derived [`Report`] from a raw issue list.
///
/// Grouping, category buckets, statistics and the grade are always computed
/// from scratch; nothing is carried over from a previous snapshot. The grade
/// is taken from this snapshot's severity counters only.
pub fn build_report(issues: Vec<Issue>) -> Report {
    let grouped = group_issues(&issues);
    let by_category = aggregate(&issues).by_category;
    let statistics = compute_statistics(&issues);
    let grade = compute_grade(
        statistics.total_issues_count,
        statistics.severity.high,
        statistics.severity.medium,
        statistics.severity.low,
    );

    info!(
        total = statistics.total_issues_count,
        groups = grouped.len(),
        score = grade.score,
        "Built report snapshot"
    );

    Report {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        issues,
        grouped,
        by_category,
        statistics,
        grade,
    }
}
