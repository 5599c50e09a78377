//! Collaborator service contracts
//!
//! The engine consumes four external services: the correction service, the
//! advisory (AI) service, the report-artifact generator and the file
//! download endpoint. Each is an object-safe async trait used through
//! `Arc<dyn …>`, so tests can substitute programmable mocks and production
//! wires in the HTTP clients from [`crate::infrastructure::clients`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::errors::EngineError;
use crate::domain::report::{Issue, RawCheckResults};

/// Correction request: the document reference plus its auto-fixable issues
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionRequest {
    /// Opaque reference to the uploaded document
    pub document_reference: String,
    /// Issues the service is asked to fix (callers pre-filter `auto_fixable`)
    pub issues: Vec<Issue>,
    /// Original filename, used by the service to name the corrected file
    pub original_filename: String,
}

/// Correction service response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionResponse {
    pub success: bool,
    #[serde(default)]
    pub corrected_file_path: Option<String>,
    /// Post-correction re-analysis, when the service performed one
    #[serde(default)]
    pub corrected_check_results: Option<RawCheckResults>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Advisory request: the active snapshot and the document filename
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub check_results: RawCheckResults,
    pub filename: String,
}

/// Advisory service response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    pub success: bool,
    #[serde(default)]
    pub suggestions: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Report-artifact generation request (always the original snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRequest {
    pub check_results: RawCheckResults,
    pub filename: String,
}

/// Report-artifact generation response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactResponse {
    pub success: bool,
    #[serde(default)]
    pub report_file_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A downloaded binary artifact
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub bytes: Vec<u8>,
    /// Raw `Content-Disposition` header, when the server sent one
    pub content_disposition: Option<String>,
}

/// External document correction service
#[async_trait]
pub trait CorrectionService: Send + Sync {
    async fn submit(&self, request: CorrectionRequest) -> Result<CorrectionResponse, EngineError>;
}

/// External AI-backed remediation advisory service
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    async fn suggest(&self, request: AdvisoryRequest) -> Result<AdvisoryResponse, EngineError>;
}

/// External report-artifact generator
#[async_trait]
pub trait ArtifactService: Send + Sync {
    async fn generate(&self, request: ArtifactRequest) -> Result<ArtifactResponse, EngineError>;
}

/// Binary download endpoint for corrected documents and report artifacts
#[async_trait]
pub trait DownloadService: Send + Sync {
    async fn download(
        &self,
        reference: &str,
        suggested_filename: &str,
    ) -> Result<DownloadedFile, EngineError>;
}
