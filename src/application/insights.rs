//! Derived analytics insights for a report snapshot

use serde::{Deserialize, Serialize};

use crate::domain::report::{Category, Report};

/// Presentation tone for an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTone {
    Info,
    Success,
    Warning,
}

/// A single advisory hint derived from the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub detail: String,
    pub tone: InsightTone,
}

/// Threshold above which the auto-fixable share is called out
const AUTO_FIXABLE_HIGHLIGHT_PERCENT: usize = 70;

/// Compute advisory hints from a derived report.
///
/// Pure derivation, recomputed per snapshot: category-presence tips, the
/// auto-fixable percentage when it dominates, and grade-based quality notes.
pub fn compute_insights(report: &Report) -> Vec<Insight> {
    let mut insights = Vec::new();

    let has_category =
        |cat: Category| report.by_category.iter().any(|group| group.category == cat);

    if has_category(Category::Font) {
        insights.push(Insight {
            title: "Font formatting".to_string(),
            detail: "Check font uniformity across the document".to_string(),
            tone: InsightTone::Info,
        });
    }

    if has_category(Category::Margins) {
        insights.push(Insight {
            title: "Page margins".to_string(),
            detail: "Verify margins against the formatting standard".to_string(),
            tone: InsightTone::Warning,
        });
    }

    let total = report.statistics.total_issues_count;
    if total > 0 {
        // Rounded to the nearest percent, not floored.
        let auto_fixable_percent = (report.statistics.auto_fixable_count * 100 + total / 2) / total;
        if auto_fixable_percent > AUTO_FIXABLE_HIGHLIGHT_PERCENT {
            insights.push(Insight {
                title: "High auto-fix potential".to_string(),
                detail: format!(
                    "{}% of issues can be corrected automatically",
                    auto_fixable_percent
                ),
                tone: InsightTone::Success,
            });
        }
    }

    if report.grade.score >= 4 {
        insights.push(Insight {
            title: "High quality".to_string(),
            detail: "The document meets formatting standards".to_string(),
            tone: InsightTone::Success,
        });
    } else if report.grade.score == 3 {
        insights.push(Insight {
            title: "Room for improvement".to_string(),
            detail: "Fixing the found issues will raise the document quality".to_string(),
            tone: InsightTone::Warning,
        });
    }

    insights
}
