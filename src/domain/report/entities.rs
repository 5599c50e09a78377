//! Report domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Category, Grade, Severity};

/// A single detected deviation from a formatting standard
///
/// Issues arrive from the analyzer (or from the correction service as a
/// post-correction list) and are immutable once created. `kind` is a
/// delimited string whose first segment is the category prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue kind, e.g. `font_size` or `margins_left`
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description
    pub description: String,
    /// Where the issue was found, e.g. `p.3`
    pub location: String,
    /// Raw severity string from the analyzer (`high`/`medium`/`low` recognized)
    pub severity: String,
    /// Whether the external correction service can fix this without manual edits
    pub auto_fixable: bool,
}

impl Issue {
    /// Recognized severity, or `None` for values outside the known set.
    pub fn recognized_severity(&self) -> Option<Severity> {
        Severity::parse(&self.severity)
    }

    /// Category derived from the kind prefix.
    pub fn category(&self) -> Category {
        Category::from_kind(&self.kind)
    }

    /// Grouping key: kind and description, exact and case-sensitive.
    pub fn group_key(&self) -> String {
        format!("{}|{}", self.kind, self.description)
    }
}

/// A deduplicated issue with occurrence count and ordered location list
///
/// Invariant: `count == locations.len()` and `count >= 1`. The representative
/// issue carries the fields of the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedIssue {
    #[serde(flatten)]
    pub issue: Issue,
    pub count: usize,
    pub locations: Vec<String>,
}

/// Severity counters over the three recognized values
///
/// Issues with unrecognized severity strings are not counted here even though
/// they stay in their category buckets. This asymmetry is inherited from the
/// original analyzer contract and preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    /// Sum of all recognized severity counters.
    pub fn recognized_total(&self) -> usize {
        self.high + self.medium + self.low
    }

    /// Increment the counter for a recognized severity.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }
}

/// Aggregate statistics for an issue snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub total_issues_count: usize,
    pub severity: SeverityCounts,
    pub auto_fixable_count: usize,
}

/// Issues bucketed under a single category, arrival order preserved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub issues: Vec<Issue>,
}

/// Immutable derived snapshot for one issue list
///
/// A `Report` is rebuilt from scratch whenever the active issue list changes
/// (view mode switch or new correction result); it is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Raw issue list the derivations were computed from
    pub issues: Vec<Issue>,
    /// Deduplicated issues in first-seen order
    pub grouped: Vec<GroupedIssue>,
    /// Category buckets in first-seen order
    pub by_category: Vec<CategoryGroup>,
    pub statistics: Statistics,
    pub grade: Grade,
}

/// Result of a correction request, cached until superseded by a new upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub success: bool,
    /// Opaque reference to the rewritten document, if any
    pub corrected_file_reference: Option<String>,
    /// Post-correction issue list, when the service re-analyzed the document
    pub corrected_issue_list: Option<Vec<Issue>>,
}

/// Entry appended to the external cross-report history store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportHistoryEntry {
    pub id: Uuid,
    pub filename: String,
    pub grade: Grade,
    pub total_issues: usize,
    pub corrected_file_reference: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Advisory text that arrived together with the analyzer payload
///
/// The analyzer may pre-compute remediation suggestions for the original and
/// corrected snapshots; these seed the advisory cache at session creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorySeeds {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}

/// Untrusted analyzer check results, validated before use
///
/// The `issues` array is mandatory; a payload without it is malformed and
/// surfaced as report-unavailable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCheckResults {
    #[serde(default)]
    pub issues: Option<Vec<Issue>>,
    #[serde(default)]
    pub total_issues_count: Option<usize>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// Full analyzer payload for one uploaded document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckPayload {
    #[serde(default)]
    pub check_results: Option<RawCheckResults>,
    /// Present when the upload pipeline already ran an automatic correction
    #[serde(default)]
    pub corrected_check_results: Option<RawCheckResults>,
    #[serde(default)]
    pub correction_success: Option<bool>,
    #[serde(default)]
    pub corrected_file_path: Option<String>,
    #[serde(default)]
    pub ai_suggestions: Option<AdvisorySeeds>,
    #[serde(default)]
    pub ai_error: Option<String>,
}
