//! HTTP implementations of the collaborator contracts
//!
//! One client speaks to the document backend for all four operations. Every
//! call runs under the configured timeout; elapsing it resolves to a
//! retryable [`EngineError::Timeout`] instead of hanging.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Client;
use tracing::{debug, error};

use crate::application::errors::EngineError;
use crate::config::CollaboratorConfig;
use crate::infrastructure::collaborators::{
    AdvisoryRequest, AdvisoryResponse, AdvisoryService, ArtifactRequest, ArtifactResponse,
    ArtifactService, CorrectionRequest, CorrectionResponse, CorrectionService, DownloadService,
    DownloadedFile,
};

/// HTTP client for the document backend
pub struct HttpCollaboratorClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl HttpCollaboratorClient {
    /// Create a client from collaborator configuration.
    pub fn new(config: &CollaboratorConfig) -> Self {
        let request_timeout = Duration::from_secs(config.request_timeout_seconds);
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build HTTP client with custom timeout, using default client");
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Run a request future under the configured timeout.
    async fn with_timeout<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, EngineError>>,
    ) -> Result<T, EngineError> {
        match tokio::time::timeout(self.request_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::timeout(self.request_timeout.as_secs())),
        }
    }
}

#[async_trait]
impl CorrectionService for HttpCollaboratorClient {
    async fn submit(&self, request: CorrectionRequest) -> Result<CorrectionResponse, EngineError> {
        let url = self.url("/api/document/correct");
        debug!(url = %url, issues = request.issues.len(), "Submitting correction request");

        self.with_timeout(async {
            let response = self.client.post(&url).json(&request).send().await?;
            let body: CorrectionResponse = response.json().await?;
            Ok(body)
        })
        .await
    }
}

#[async_trait]
impl AdvisoryService for HttpCollaboratorClient {
    async fn suggest(&self, request: AdvisoryRequest) -> Result<AdvisoryResponse, EngineError> {
        let url = self.url("/api/document/ai/suggest");
        debug!(url = %url, filename = %request.filename, "Requesting advisory suggestions");

        self.with_timeout(async {
            let response = self.client.post(&url).json(&request).send().await?;
            let body: AdvisoryResponse = response.json().await?;
            Ok(body)
        })
        .await
    }
}

#[async_trait]
impl ArtifactService for HttpCollaboratorClient {
    async fn generate(&self, request: ArtifactRequest) -> Result<ArtifactResponse, EngineError> {
        let url = self.url("/api/document/generate-report");
        debug!(url = %url, filename = %request.filename, "Requesting report artifact");

        self.with_timeout(async {
            let response = self.client.post(&url).json(&request).send().await?;
            let body: ArtifactResponse = response.json().await?;
            Ok(body)
        })
        .await
    }
}

#[async_trait]
impl DownloadService for HttpCollaboratorClient {
    async fn download(
        &self,
        reference: &str,
        suggested_filename: &str,
    ) -> Result<DownloadedFile, EngineError> {
        let url = self.url("/api/document/download-corrected");
        debug!(url = %url, reference = %reference, "Downloading file");

        self.with_timeout(async {
            let response = self
                .client
                .get(&url)
                .query(&[("path", reference), ("filename", suggested_filename)])
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(EngineError::service(format!(
                    "download failed with status {}",
                    response.status()
                )));
            }

            let content_disposition = response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string());

            let bytes = response.bytes().await?.to_vec();
            Ok(DownloadedFile {
                bytes,
                content_disposition,
            })
        })
        .await
    }
}
