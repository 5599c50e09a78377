//! Programmable mock collaborators
//!
//! Each mock records the requests it receives and answers with a
//! pre-configured response, error or delay, so tests can drive the
//! orchestration paths without a live backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use normcheck::application::errors::EngineError;
use normcheck::infrastructure::collaborators::{
    AdvisoryRequest, AdvisoryResponse, AdvisoryService, ArtifactRequest, ArtifactResponse,
    ArtifactService, CorrectionRequest, CorrectionResponse, CorrectionService, DownloadService,
    DownloadedFile,
};

type Outcome<T> = Result<T, String>;

fn clone_err(message: &str) -> EngineError {
    if message == "timeout" {
        EngineError::timeout(30)
    } else {
        EngineError::network(message.to_string())
    }
}

/// Mock correction service with a programmable outcome
pub struct MockCorrectionService {
    outcome: Outcome<CorrectionResponse>,
    delay: Option<Duration>,
    pub requests: Mutex<Vec<CorrectionRequest>>,
}

impl MockCorrectionService {
    pub fn succeeding(response: CorrectionResponse) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(response),
            delay: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A service whose transport times out.
    pub fn timing_out() -> Arc<Self> {
        Arc::new(Self {
            outcome: Err("timeout".to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A service that fails with a network error.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A succeeding service that answers after `delay`.
    pub fn slow(response: CorrectionResponse, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(response),
            delay: Some(delay),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CorrectionService for MockCorrectionService {
    async fn submit(&self, request: CorrectionRequest) -> Result<CorrectionResponse, EngineError> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(clone_err(message)),
        }
    }
}

/// Mock advisory service with per-call outcomes
///
/// Outcomes are consumed in order; the last one repeats once the queue is
/// drained. Each outcome may carry a delay, so tests can make an earlier
/// call complete after a later one.
pub struct MockAdvisoryService {
    outcomes: Mutex<Vec<(Outcome<AdvisoryResponse>, Option<Duration>)>>,
    pub requests: Mutex<Vec<AdvisoryRequest>>,
}

impl MockAdvisoryService {
    pub fn with_outcomes(outcomes: Vec<Result<AdvisoryResponse, String>>) -> Arc<Self> {
        Self::with_scripted(outcomes.into_iter().map(|o| (o, None)).collect())
    }

    pub fn with_scripted(
        outcomes: Vec<(Result<AdvisoryResponse, String>, Option<Duration>)>,
    ) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn suggesting(text: &str) -> Arc<Self> {
        Self::with_outcomes(vec![Ok(AdvisoryResponse {
            success: true,
            suggestions: Some(text.to_string()),
            error: None,
        })])
    }

    pub fn erroring(message: &str) -> Arc<Self> {
        Self::with_outcomes(vec![Ok(AdvisoryResponse {
            success: false,
            suggestions: None,
            error: Some(message.to_string()),
        })])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AdvisoryService for MockAdvisoryService {
    async fn suggest(&self, request: AdvisoryRequest) -> Result<AdvisoryResponse, EngineError> {
        self.requests.lock().unwrap().push(request);
        let (outcome, delay) = {
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                outcomes
                    .first()
                    .cloned()
                    .unwrap_or((Err("exhausted".to_string()), None))
            }
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match outcome {
            Ok(response) => Ok(response),
            Err(message) => Err(clone_err(&message)),
        }
    }
}

/// Mock artifact service with per-call outcomes and optional delays
///
/// Outcomes are consumed in order; the last one repeats once the queue is
/// drained.
pub struct MockArtifactService {
    outcomes: Mutex<Vec<(Outcome<ArtifactResponse>, Option<Duration>)>>,
    pub requests: Mutex<Vec<ArtifactRequest>>,
}

impl MockArtifactService {
    pub fn succeeding(reference: &str) -> Arc<Self> {
        Self::with_scripted(vec![(
            Ok(ArtifactResponse {
                success: true,
                report_file_path: Some(reference.to_string()),
                error: None,
            }),
            None,
        )])
    }

    pub fn erroring(message: &str) -> Arc<Self> {
        Self::with_scripted(vec![(
            Ok(ArtifactResponse {
                success: false,
                report_file_path: None,
                error: Some(message.to_string()),
            }),
            None,
        )])
    }

    pub fn with_scripted(
        outcomes: Vec<(Result<ArtifactResponse, String>, Option<Duration>)>,
    ) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ArtifactService for MockArtifactService {
    async fn generate(&self, request: ArtifactRequest) -> Result<ArtifactResponse, EngineError> {
        self.requests.lock().unwrap().push(request);
        let (outcome, delay) = {
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                outcomes
                    .first()
                    .cloned()
                    .unwrap_or((Err("exhausted".to_string()), None))
            }
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match outcome {
            Ok(response) => Ok(response),
            Err(message) => Err(clone_err(&message)),
        }
    }
}

/// Mock download endpoint recording requested references
pub struct MockDownloadService {
    fails: bool,
    content_disposition: Option<String>,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl MockDownloadService {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            fails: false,
            content_disposition: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn with_content_disposition(header: &str) -> Arc<Self> {
        Arc::new(Self {
            fails: false,
            content_disposition: Some(header.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fails: true,
            content_disposition: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl DownloadService for MockDownloadService {
    async fn download(
        &self,
        reference: &str,
        suggested_filename: &str,
    ) -> Result<DownloadedFile, EngineError> {
        self.requests
            .lock()
            .unwrap()
            .push((reference.to_string(), suggested_filename.to_string()));
        if self.fails {
            return Err(EngineError::network("connection reset"));
        }
        Ok(DownloadedFile {
            bytes: b"artifact-bytes".to_vec(),
            content_disposition: self.content_disposition.clone(),
        })
    }
}
