//! Report session: view mode selection over the pre/post correction snapshots

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::errors::EngineError;
use crate::application::report::build_report;
use crate::domain::report::{
    AdvisorySeeds, CheckPayload, CorrectionResult, Issue, RawCheckResults, Report,
    ReportHistoryEntry, ViewMode,
};
use crate::infrastructure::history::HistoryStore;

/// One uploaded document's report state
///
/// Owns the original analyzer snapshot, the optional correction result and
/// the active view mode. The derived [`Report`] is rebuilt from the raw issue
/// list on every mode switch and whenever a new correction result arrives;
/// derived data is never cached across switches. Sessions are independent of
/// each other; nothing is shared between documents.
pub struct ReportSession {
    filename: String,
    original_issues: Vec<Issue>,
    correction: Option<CorrectionResult>,
    advisory_seeds: AdvisorySeeds,
    advisory_seed_error: Option<String>,
    mode: ViewMode,
    active: Report,
    history: Arc<dyn HistoryStore>,
}

impl std::fmt::Debug for ReportSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportSession")
            .field("filename", &self.filename)
            .field("original_issues", &self.original_issues)
            .field("correction", &self.correction)
            .field("advisory_seeds", &self.advisory_seeds)
            .field("advisory_seed_error", &self.advisory_seed_error)
            .field("mode", &self.mode)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl ReportSession {
    /// Create a session from a raw analyzer payload.
    ///
    /// The payload must carry `check_results` with an `issues` array;
    /// anything else is malformed and surfaced as report-unavailable. A
    /// payload that already includes post-correction results (upload-time
    /// auto-correction) opens in [`ViewMode::Post`]. The new report is
    /// appended to the external history store.
    pub fn from_payload(
        payload: CheckPayload,
        filename: impl Into<String>,
        history: Arc<dyn HistoryStore>,
    ) -> Result<Self, EngineError> {
        let filename = filename.into();

        let original_issues = validate_check_results(payload.check_results)?;

        // A corrected block without an issues array cannot feed the Post
        // pipeline; only the file reference (if any) is kept.
        let corrected_issue_list = payload
            .corrected_check_results
            .and_then(|raw| raw.issues);
        let correction = match (&corrected_issue_list, &payload.corrected_file_path) {
            (None, None) => None,
            _ => Some(CorrectionResult {
                success: payload.correction_success.unwrap_or(true),
                corrected_file_reference: payload.corrected_file_path,
                corrected_issue_list,
            }),
        };

        let post_available = correction
            .as_ref()
            .is_some_and(|c| c.corrected_issue_list.is_some());
        let mode = if post_available {
            ViewMode::Post
        } else {
            ViewMode::Pre
        };

        let active = match mode {
            ViewMode::Pre => build_report(original_issues.clone()),
            ViewMode::Post => build_report(
                correction
                    .as_ref()
                    .and_then(|c| c.corrected_issue_list.clone())
                    .unwrap_or_default(),
            ),
        };

        info!(
            filename = %filename,
            mode = %mode,
            total = active.statistics.total_issues_count,
            "Opened report session"
        );

        let session = Self {
            filename,
            original_issues,
            correction,
            advisory_seeds: payload.ai_suggestions.unwrap_or_default(),
            advisory_seed_error: payload.ai_error,
            mode,
            active,
            history,
        };

        session.history.add_entry(session.history_entry());
        Ok(session)
    }

    /// Currently active view mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Read-only view of the active derived report.
    pub fn active_report(&self) -> &Report {
        &self.active
    }

    /// Original pre-correction issue list (fixed input for report export).
    pub fn original_issues(&self) -> &[Issue] {
        &self.original_issues
    }

    /// Filename of the uploaded document.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The cached correction result, if any.
    pub fn correction(&self) -> Option<&CorrectionResult> {
        self.correction.as_ref()
    }

    /// Advisory text that arrived with the analyzer payload, per mode.
    pub fn advisory_seed(&self, mode: ViewMode) -> Option<&str> {
        match mode {
            ViewMode::Pre => self.advisory_seeds.before.as_deref(),
            ViewMode::Post => self.advisory_seeds.after.as_deref(),
        }
    }

    /// Advisory error reported by the analyzer pipeline, if any.
    pub fn advisory_seed_error(&self) -> Option<&str> {
        self.advisory_seed_error.as_deref()
    }

    /// Whether the post-correction snapshot can be displayed.
    pub fn post_available(&self) -> bool {
        self.correction
            .as_ref()
            .is_some_and(|c| c.corrected_issue_list.is_some())
    }

    /// Switch the active view mode, rebuilding the derived report.
    ///
    /// Switching to [`ViewMode::Post`] while no corrected issue list exists
    /// is a no-op; the session stays on `Pre`. Returns the mode in effect
    /// after the call.
    pub fn set_mode(&mut self, mode: ViewMode) -> ViewMode {
        if mode == ViewMode::Post && !self.post_available() {
            warn!("Post-correction view requested but no corrected issue list exists");
            return self.mode;
        }
        if mode == self.mode {
            return self.mode;
        }

        self.mode = mode;
        self.rebuild_active();
        self.mode
    }

    /// Adopt a correction result produced by the orchestrator.
    ///
    /// When the result carries a corrected issue list the session switches to
    /// [`ViewMode::Post`] and recomputes; otherwise only the file reference
    /// becomes available and a session already on `Post` falls back to `Pre`,
    /// since the post view is only valid with a corrected issue list. The
    /// history entry is refreshed so it records the corrected file.
    pub fn apply_correction(&mut self, result: CorrectionResult) {
        let has_list = result.corrected_issue_list.is_some();
        self.correction = Some(result);

        if has_list {
            self.mode = ViewMode::Post;
        } else if self.mode == ViewMode::Post {
            warn!("Correction result carries no issue list; reverting to the pre-correction view");
            self.mode = ViewMode::Pre;
        }
        self.rebuild_active();
        self.history.add_entry(self.history_entry());
    }

    /// Serialize the active snapshot for collaborator requests.
    pub fn snapshot_payload(&self) -> RawCheckResults {
        RawCheckResults {
            issues: Some(self.active.issues.clone()),
            total_issues_count: Some(self.active.statistics.total_issues_count),
            statistics: Some(self.active.statistics.clone()),
        }
    }

    /// Serialize the original pre-correction snapshot (export input).
    pub fn original_snapshot_payload(&self) -> RawCheckResults {
        let report = build_report(self.original_issues.clone());
        RawCheckResults {
            issues: Some(report.issues.clone()),
            total_issues_count: Some(report.statistics.total_issues_count),
            statistics: Some(report.statistics),
        }
    }

    fn rebuild_active(&mut self) {
        let issues = match self.mode {
            ViewMode::Pre => self.original_issues.clone(),
            ViewMode::Post => self
                .correction
                .as_ref()
                .and_then(|c| c.corrected_issue_list.clone())
                .unwrap_or_default(),
        };
        self.active = build_report(issues);
    }

    fn history_entry(&self) -> ReportHistoryEntry {
        ReportHistoryEntry {
            id: Uuid::new_v4(),
            filename: self.filename.clone(),
            grade: self.active.grade.clone(),
            total_issues: self.active.statistics.total_issues_count,
            corrected_file_reference: self
                .correction
                .as_ref()
                .and_then(|c| c.corrected_file_reference.clone()),
            recorded_at: Utc::now(),
        }
    }
}

/// Validate the raw analyzer check results into a usable issue list.
fn validate_check_results(raw: Option<RawCheckResults>) -> Result<Vec<Issue>, EngineError> {
    let results =
        raw.ok_or_else(|| EngineError::Validation("missing check_results".to_string()))?;
    results
        .issues
        .ok_or_else(|| EngineError::Validation("check_results has no issues array".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::history::InMemoryHistoryStore;

    fn issue(kind: &str, severity: &str) -> Issue {
        Issue {
            kind: kind.to_string(),
            description: "desc".to_string(),
            location: "p.1".to_string(),
            severity: severity.to_string(),
            auto_fixable: true,
        }
    }

    fn payload(issues: Vec<Issue>) -> CheckPayload {
        CheckPayload {
            check_results: Some(RawCheckResults {
                issues: Some(issues),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn session(p: CheckPayload) -> Result<ReportSession, EngineError> {
        ReportSession::from_payload(p, "thesis.docx", Arc::new(InMemoryHistoryStore::new()))
    }

    #[test]
    fn test_missing_check_results_is_validation_error() {
        let err = session(CheckPayload::default()).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_missing_issues_array_is_validation_error() {
        let p = CheckPayload {
            check_results: Some(RawCheckResults::default()),
            ..Default::default()
        };
        assert!(matches!(session(p), Err(EngineError::Validation(_))));
    }

    #[test]
    fn test_default_mode_is_pre_without_correction() {
        let s = session(payload(vec![issue("font_size", "high")])).unwrap();
        assert_eq!(s.mode(), ViewMode::Pre);
        assert!(!s.post_available());
    }

    #[test]
    fn test_default_mode_is_post_with_corrected_results() {
        let mut p = payload(vec![issue("font_size", "high")]);
        p.corrected_check_results = Some(RawCheckResults {
            issues: Some(vec![]),
            ..Default::default()
        });
        p.correction_success = Some(true);

        let s = session(p).unwrap();
        assert_eq!(s.mode(), ViewMode::Post);
        assert_eq!(s.active_report().grade.score, 5);
    }

    #[test]
    fn test_switch_to_post_without_correction_is_noop() {
        let mut s = session(payload(vec![issue("font_size", "high")])).unwrap();
        assert_eq!(s.set_mode(ViewMode::Post), ViewMode::Pre);
        assert_eq!(s.mode(), ViewMode::Pre);
    }

    #[test]
    fn test_empty_corrected_list_always_grades_five() {
        // Pre snapshot is bad enough to grade 1, but the corrected snapshot
        // is empty and must grade 5.
        let issues: Vec<Issue> = (0..8).map(|_| issue("font_size", "high")).collect();
        let mut p = payload(issues);
        p.corrected_check_results = Some(RawCheckResults {
            issues: Some(vec![]),
            ..Default::default()
        });

        let mut s = session(p).unwrap();
        assert_eq!(s.active_report().grade.score, 5);

        s.set_mode(ViewMode::Pre);
        assert_eq!(s.active_report().grade.score, 1);

        s.set_mode(ViewMode::Post);
        assert_eq!(s.active_report().grade.score, 5);
    }

    #[test]
    fn test_mode_switch_recomputes_report() {
        let mut p = payload(vec![issue("font_size", "high")]);
        p.corrected_check_results = Some(RawCheckResults {
            issues: Some(vec![issue("margins_left", "low")]),
            ..Default::default()
        });

        let mut s = session(p).unwrap();
        let post_id = s.active_report().id;
        s.set_mode(ViewMode::Pre);
        let pre_id = s.active_report().id;
        s.set_mode(ViewMode::Post);

        // Fresh snapshots each switch, never a cached instance.
        assert_ne!(post_id, pre_id);
        assert_ne!(s.active_report().id, post_id);
        assert_eq!(s.active_report().statistics.severity.low, 1);
    }

    #[test]
    fn test_apply_correction_switches_to_post() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut s = ReportSession::from_payload(
            payload(vec![issue("font_size", "high")]),
            "thesis.docx",
            store.clone(),
        )
        .unwrap();

        s.apply_correction(CorrectionResult {
            success: true,
            corrected_file_reference: Some("corrected_thesis.docx".to_string()),
            corrected_issue_list: Some(vec![]),
        });

        assert_eq!(s.mode(), ViewMode::Post);
        assert_eq!(s.active_report().grade.score, 5);
        // Session creation plus the refreshed entry after correction.
        assert_eq!(store.entries().len(), 2);
        assert_eq!(
            store.entries()[1].corrected_file_reference.as_deref(),
            Some("corrected_thesis.docx")
        );
    }

    #[test]
    fn test_correction_without_list_keeps_pre_mode() {
        let mut s = session(payload(vec![issue("font_size", "high")])).unwrap();
        s.apply_correction(CorrectionResult {
            success: true,
            corrected_file_reference: Some("ref".to_string()),
            corrected_issue_list: None,
        });

        assert_eq!(s.mode(), ViewMode::Pre);
        assert!(!s.post_available());
        assert_eq!(s.set_mode(ViewMode::Post), ViewMode::Pre);
    }

    #[test]
    fn test_correction_without_list_demotes_active_post_mode() {
        // The session opens in Post thanks to upload-time corrected results.
        let mut p = payload(vec![issue("font_size", "high")]);
        p.corrected_check_results = Some(RawCheckResults {
            issues: Some(vec![]),
            ..Default::default()
        });
        let mut s = session(p).unwrap();
        assert_eq!(s.mode(), ViewMode::Post);

        // A newer result without an issue list invalidates the post view;
        // the session must fall back to the real pre-correction snapshot
        // instead of grading a fabricated empty list.
        s.apply_correction(CorrectionResult {
            success: true,
            corrected_file_reference: Some("ref".to_string()),
            corrected_issue_list: None,
        });

        assert_eq!(s.mode(), ViewMode::Pre);
        assert!(!s.post_available());
        assert_eq!(s.active_report().statistics.total_issues_count, 1);
        assert_eq!(s.active_report().grade.score, 2);
    }
}
