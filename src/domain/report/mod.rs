//! Report domain: entities and value objects for the compliance report engine

pub mod entities;
pub mod value_objects;

pub use entities::{
    AdvisorySeeds, CategoryGroup, CheckPayload, CorrectionResult, GroupedIssue, Issue,
    RawCheckResults, Report, ReportHistoryEntry, SeverityCounts, Statistics,
};
pub use value_objects::{
    Category, CorrectionStatus, CorrectionTransitionError, Grade, GradeColor, Severity, ViewMode,
};
