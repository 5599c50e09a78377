//! Normcheck - Document compliance report engine
//!
//! Turns a raw list of detected formatting deviations into a deduplicated,
//! categorized, graded report; tracks the before/after duality of an
//! automatic correction; and coordinates advisory text and report-artifact
//! export against external collaborator services.
//!
//! # Modules
//!
//! - [`domain`] — Issues, grouped issues, statistics, grades and lifecycle value objects
//! - [`application`] — Normalizer, aggregator, grading, session, correction, advisory, export
//! - [`infrastructure`] — Collaborator contracts, HTTP clients and the history store seam
//! - [`config`] — Strongly-typed configuration with serde defaults
//! - [`logging`] — Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! normcheck/
//! ├── domain/report/       # Pure business data
//! ├── application/         # Derivations and stateful coordinators
//! ├── infrastructure/      # Collaborator clients, history store
//! ├── config/              # Configuration management
//! └── logging              # Tracing bootstrap
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use normcheck::application::ReportSession;
//! use normcheck::infrastructure::InMemoryHistoryStore;
//!
//! let payload = serde_json::from_str(&analyzer_json)?;
//! let mut session =
//!     ReportSession::from_payload(payload, "thesis.docx", Arc::new(InMemoryHistoryStore::new()))?;
//! let report = session.active_report();
//! println!("grade: {} ({})", report.grade.score, report.grade.label);
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use application::{
    AdvisorySuggestionCache, CorrectionOrchestrator, EngineError, ReportExporter, ReportSession,
};
pub use config::Config;
pub use domain::report::{
    CheckPayload, CorrectionResult, CorrectionStatus, Grade, GradeColor, Issue, Report, Severity,
    ViewMode,
};
pub use logging::init_tracing;
