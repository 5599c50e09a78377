//! Correction orchestration: drives the external correction request lifecycle

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::application::errors::EngineError;
use crate::application::export::ensure_document_extension;
use crate::domain::report::{
    CorrectionResult, CorrectionStatus, CorrectionTransitionError, Issue,
};
use crate::infrastructure::collaborators::{
    CorrectionRequest, CorrectionService, DownloadService,
};

#[derive(Debug)]
struct OrchestratorState {
    status: CorrectionStatus,
    result: Option<CorrectionResult>,
    error: Option<String>,
    auto_download_failed: bool,
}

/// State machine driving a correction request and the resulting download
///
/// `Idle → Submitting → {Succeeded | Failed}`, with `Failed → Submitting` on
/// retry. At most one submission is in flight per orchestrator; a second
/// `submit` while `Submitting` is rejected without touching any state. A
/// successful correction triggers a best-effort automatic download whose
/// failure is recorded in a separate non-blocking flag.
pub struct CorrectionOrchestrator {
    service: Arc<dyn CorrectionService>,
    downloads: Arc<dyn DownloadService>,
    state: Mutex<OrchestratorState>,
}

impl CorrectionOrchestrator {
    pub fn new(service: Arc<dyn CorrectionService>, downloads: Arc<dyn DownloadService>) -> Self {
        Self {
            service,
            downloads,
            state: Mutex::new(OrchestratorState {
                status: CorrectionStatus::Idle,
                result: None,
                error: None,
                auto_download_failed: false,
            }),
        }
    }

    /// Current lifecycle status.
    pub fn status(&self) -> CorrectionStatus {
        self.lock_state().status.clone()
    }

    /// The cached correction result, once a submission succeeded.
    pub fn result(&self) -> Option<CorrectionResult> {
        self.lock_state().result.clone()
    }

    /// Error message of the last failed submission, if any.
    pub fn error_message(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    /// Whether the automatic download after a successful correction failed.
    ///
    /// Advisory only: a failed auto-download never invalidates a successful
    /// correction.
    pub fn auto_download_failed(&self) -> bool {
        self.lock_state().auto_download_failed
    }

    /// Submit the document for automatic correction.
    ///
    /// Only issues flagged `auto_fixable` are sent. Rejects with
    /// [`EngineError::SubmissionInFlight`] while another submission is
    /// running. On collaborator failure (network, timeout or
    /// `success: false`) the orchestrator transitions to `Failed` and the
    /// previously cached result, if any, stays untouched.
    pub async fn submit(
        &self,
        document_reference: &str,
        original_filename: &str,
        issues: &[Issue],
    ) -> Result<CorrectionResult, EngineError> {
        self.begin_submission()?;

        let auto_fixable: Vec<Issue> = issues
            .iter()
            .filter(|issue| issue.auto_fixable)
            .cloned()
            .collect();

        info!(
            document = %document_reference,
            auto_fixable = auto_fixable.len(),
            "Submitting correction request"
        );

        let request = CorrectionRequest {
            document_reference: document_reference.to_string(),
            issues: auto_fixable,
            original_filename: original_filename.to_string(),
        };

        let response = match self.service.submit(request).await {
            Ok(response) => response,
            Err(err) => {
                self.fail_submission(err.to_string());
                return Err(err);
            }
        };

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "Document correction failed".to_string());
            self.fail_submission(message.clone());
            return Err(EngineError::service(message));
        }

        let result = CorrectionResult {
            success: true,
            corrected_file_reference: response.corrected_file_path,
            corrected_issue_list: response.corrected_check_results.and_then(|r| r.issues),
        };

        {
            let mut state = self.lock_state();
            state.status = CorrectionStatus::Succeeded;
            state.result = Some(result.clone());
            state.error = None;
            state.auto_download_failed = false;
        }

        info!(
            corrected_file = ?result.corrected_file_reference,
            has_issue_list = result.corrected_issue_list.is_some(),
            "Correction succeeded"
        );

        self.auto_download(&result, original_filename).await;

        Ok(result)
    }

    /// Best-effort automatic download of the corrected file.
    async fn auto_download(&self, result: &CorrectionResult, original_filename: &str) {
        let Some(reference) = result.corrected_file_reference.as_deref() else {
            return;
        };

        let suggested = ensure_document_extension(original_filename);
        if let Err(err) = self.downloads.download(reference, &suggested).await {
            warn!(error = %err, "Automatic download of corrected file failed");
            self.lock_state().auto_download_failed = true;
        }
    }

    /// Transition to `Submitting`, enforcing mutual exclusion.
    fn begin_submission(&self) -> Result<(), EngineError> {
        let mut state = self.lock_state();

        if state.status.is_in_flight() {
            return Err(EngineError::SubmissionInFlight);
        }
        if !state.status.can_transition_to(&CorrectionStatus::Submitting) {
            return Err(CorrectionTransitionError {
                from: state.status.clone(),
                to: CorrectionStatus::Submitting,
            }
            .into());
        }

        state.status = CorrectionStatus::Submitting;
        state.error = None;
        Ok(())
    }

    fn fail_submission(&self, message: String) {
        warn!(error = %message, "Correction submission failed");
        let mut state = self.lock_state();
        state.status = CorrectionStatus::Failed;
        state.error = Some(message);
    }

    fn lock_state(&self) -> MutexGuard<'_, OrchestratorState> {
        // A poisoned lock only means another caller panicked mid-update;
        // the state itself stays usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
