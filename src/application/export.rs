//! Report export: artifact generation and download filename resolution

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::application::errors::EngineError;
use crate::domain::report::RawCheckResults;
use crate::infrastructure::collaborators::{
    ArtifactRequest, ArtifactService, DownloadService, DownloadedFile,
};

/// Fixed extension for generated documents and report artifacts
const DOCUMENT_EXTENSION: &str = ".docx";

#[derive(Debug, Default)]
struct ExporterState {
    artifact_reference: Option<String>,
    error: Option<String>,
}

/// A downloaded report artifact with its resolved filename
#[derive(Debug, Clone)]
pub struct DownloadedArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Requests report artifacts and exposes their downloads
///
/// Artifact generation always consumes the original pre-correction snapshot,
/// regardless of the active view mode. Overlapping `generate_artifact` calls
/// follow last-write-wins: a completion that has been superseded by a newer
/// request does not overwrite the exporter state.
pub struct ReportExporter {
    artifacts: Arc<dyn ArtifactService>,
    downloads: Arc<dyn DownloadService>,
    state: Mutex<ExporterState>,
    generation: AtomicU64,
}

impl ReportExporter {
    pub fn new(artifacts: Arc<dyn ArtifactService>, downloads: Arc<dyn DownloadService>) -> Self {
        Self {
            artifacts,
            downloads,
            state: Mutex::new(ExporterState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Reference of the last successfully generated artifact.
    pub fn artifact_reference(&self) -> Option<String> {
        self.lock_state().artifact_reference.clone()
    }

    /// Error message of the last failed generation, if any.
    pub fn error_message(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    /// Request a downloadable report artifact for the original issue list.
    ///
    /// `original_snapshot` must be the pre-correction check results; callers
    /// pass [`crate::application::session::ReportSession::original_snapshot_payload`]
    /// rather than the active snapshot (deliberate fixed input).
    pub async fn generate_artifact(
        &self,
        original_snapshot: RawCheckResults,
        filename: &str,
    ) -> Result<String, EngineError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        info!(filename = %filename, "Requesting report artifact");

        let request = ArtifactRequest {
            check_results: original_snapshot,
            filename: filename.to_string(),
        };

        let outcome = match self.artifacts.generate(request).await {
            Ok(response) if response.success => match response.report_file_path {
                Some(reference) => Ok(reference),
                None => Err(EngineError::InvalidResponse(
                    "artifact response missing report_file_path".to_string(),
                )),
            },
            Ok(response) => Err(EngineError::service(
                response
                    .error
                    .unwrap_or_else(|| "Report generation failed".to_string()),
            )),
            Err(err) => Err(err),
        };

        // A newer request supersedes this one; its completion wins.
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding superseded artifact generation result");
            return outcome;
        }

        let mut state = self.lock_state();
        match &outcome {
            Ok(reference) => {
                state.artifact_reference = Some(reference.clone());
                state.error = None;
            }
            Err(err) => {
                warn!(error = %err, "Report artifact generation failed");
                state.error = Some(err.to_string());
            }
        }
        drop(state);

        outcome
    }

    /// Download an artifact and resolve its final filename.
    pub async fn download(
        &self,
        reference: &str,
        suggested_filename: &str,
    ) -> Result<DownloadedArtifact, EngineError> {
        let file = self.downloads.download(reference, suggested_filename).await?;
        let filename = resolve_download_filename(
            file.content_disposition.as_deref(),
            Some(suggested_filename),
            reference,
        );
        let DownloadedFile { bytes, .. } = file;
        Ok(DownloadedArtifact { filename, bytes })
    }

    fn lock_state(&self) -> MutexGuard<'_, ExporterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Resolve the final download filename.
///
/// Precedence: `Content-Disposition` header (RFC 5987 `filename*=UTF-8''`
/// form preferred, quoted `filename=` fallback), then the suggested name,
/// then the last path segment of the reference. The fixed document extension
/// is appended when missing (case-insensitive check).
pub fn resolve_download_filename(
    content_disposition: Option<&str>,
    suggested_filename: Option<&str>,
    reference: &str,
) -> String {
    let from_header = content_disposition.and_then(parse_content_disposition);

    let name = from_header
        .or_else(|| {
            suggested_filename
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| {
            reference
                .rsplit(['/', '\\'])
                .next()
                .unwrap_or(reference)
                .to_string()
        });

    ensure_document_extension(&name)
}

/// Extract a filename from a `Content-Disposition` header value.
pub fn parse_content_disposition(header: &str) -> Option<String> {
    // RFC 5987 extended form takes precedence over the plain parameter.
    if let Some(rest) = find_param(header, "filename*=UTF-8''") {
        let raw: String = rest.chars().take_while(|c| *c != ';').collect();
        let decoded = urlencoding::decode(&raw)
            .map(|cow| cow.into_owned())
            .unwrap_or(raw);
        if !decoded.is_empty() {
            return Some(decoded);
        }
    }

    if let Some(rest) = find_param(header, "filename=") {
        let trimmed = rest.trim_start_matches('"');
        let name: String = trimmed
            .chars()
            .take_while(|c| *c != '"' && *c != ';')
            .collect();
        if !name.is_empty() {
            return Some(name);
        }
    }

    None
}

/// Append the fixed document extension when missing (case insensitive).
pub fn ensure_document_extension(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(DOCUMENT_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, DOCUMENT_EXTENSION)
    }
}

/// Case-insensitive parameter lookup inside a header value.
fn find_param<'a>(header: &'a str, param: &str) -> Option<&'a str> {
    let lower = header.to_ascii_lowercase();
    let needle = param.to_ascii_lowercase();
    lower.find(&needle).map(|idx| &header[idx + param.len()..])
}
