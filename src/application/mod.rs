//! Application Layer - Engine operations over the report domain
//!
//! Pure derivations (normalizer, aggregator, grading, report, insights) and
//! stateful coordinators (session, correction, advisory, export).

pub mod advisory;
pub mod aggregator;
pub mod correction;
pub mod errors;
pub mod export;
pub mod grading;
pub mod insights;
pub mod normalizer;
pub mod report;
pub mod session;

pub use advisory::AdvisorySuggestionCache;
pub use aggregator::{aggregate, compute_statistics, Aggregation};
pub use correction::CorrectionOrchestrator;
pub use errors::EngineError;
pub use export::{
    ensure_document_extension, resolve_download_filename, DownloadedArtifact, ReportExporter,
};
pub use grading::compute_grade;
pub use insights::{compute_insights, Insight, InsightTone};
pub use normalizer::{flatten_groups, group_issues};
pub use report::build_report;
pub use session::ReportSession;
