//! Infrastructure Layer - External integrations
//!
//! Collaborator service contracts and their HTTP implementations, plus the
//! append-only history store seam.

pub mod clients;
pub mod collaborators;
pub mod history;

pub use clients::HttpCollaboratorClient;
pub use collaborators::{
    AdvisoryRequest, AdvisoryResponse, AdvisoryService, ArtifactRequest, ArtifactResponse,
    ArtifactService, CorrectionRequest, CorrectionResponse, CorrectionService, DownloadService,
    DownloadedFile,
};
pub use history::{HistoryStore, InMemoryHistoryStore, NoopHistoryStore};
