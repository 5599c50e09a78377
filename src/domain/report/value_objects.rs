//! Report domain value objects

use serde::{Deserialize, Serialize};

/// Severity classification for a detected formatting issue
///
/// Analyzer payloads carry severity as a free-form string. Only the three
/// recognized values participate in severity counting; anything else is kept
/// on the issue verbatim but excluded from the counters (see
/// [`Severity::parse`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Parse a raw severity string from an analyzer payload.
    ///
    /// Returns `None` for unrecognized values. Callers must keep the issue in
    /// its category bucket regardless; only the severity counters skip it.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Declared category table for issue kinds
///
/// The analyzer encodes the category as the segment before the first `_` in
/// the issue kind. Known prefixes map to declared variants; anything else is
/// preserved as [`Category::Other`] with the raw prefix (or the whole string
/// when no delimiter exists).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Font,
    Margins,
    Line,
    Paragraphs,
    Images,
    Tables,
    Lists,
    Headers,
    Structure,
    Page,
    Other(String),
}

impl Category {
    /// Derive the category from an issue kind string.
    ///
    /// The prefix is the text before the first `_`; when no delimiter exists
    /// the whole string is used (original analyzer convention, preserved for
    /// compatibility).
    pub fn from_kind(kind: &str) -> Self {
        let prefix = kind.split('_').next().unwrap_or(kind);
        match prefix {
            "font" => Self::Font,
            "margins" => Self::Margins,
            "line" => Self::Line,
            "paragraphs" => Self::Paragraphs,
            "images" => Self::Images,
            "tables" => Self::Tables,
            "lists" => Self::Lists,
            "headers" => Self::Headers,
            "structure" => Self::Structure,
            "page" => Self::Page,
            other => Self::Other(other.to_string()),
        }
    }

    /// Raw prefix string as it appears in issue kinds.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Font => "font",
            Self::Margins => "margins",
            Self::Line => "line",
            Self::Paragraphs => "paragraphs",
            Self::Images => "images",
            Self::Tables => "tables",
            Self::Lists => "lists",
            Self::Headers => "headers",
            Self::Structure => "structure",
            Self::Page => "page",
            Self::Other(raw) => raw,
        }
    }

    /// Human-readable display name for report rendering.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Font => "Font formatting",
            Self::Margins => "Page margins",
            Self::Line => "Line spacing",
            Self::Paragraphs => "Paragraph formatting",
            Self::Images => "Figures and images",
            Self::Tables => "Tables",
            Self::Lists => "Lists",
            Self::Headers => "Headings",
            Self::Structure => "Document structure",
            Self::Page => "Page layout",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color class attached to a grade for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeColor {
    Success,
    Warning,
    Error,
}

/// Overall document grade, derived purely from severity counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    /// Score from 1 (worst) to 5 (best)
    pub score: u8,
    /// Human-readable label
    pub label: String,
    /// Presentation color class
    pub color: GradeColor,
}

/// Which issue snapshot the session currently displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Original, pre-correction snapshot
    Pre,
    /// Post-correction snapshot (valid only when a corrected issue list exists)
    Post,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pre => write!(f, "pre"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// Correction submission status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionStatus {
    /// No submission has been made
    Idle,
    /// A submission is in flight
    Submitting,
    /// The correction service accepted the document and returned a result
    Succeeded,
    /// The submission failed (network, timeout or service error)
    Failed,
}

impl CorrectionStatus {
    /// Returns the set of valid target states from the current state.
    ///
    /// ```text
    /// Idle ──► Submitting ──► Succeeded
    ///              ▲  │
    ///              │  └─────► Failed
    ///              └──────────┘ (retry)
    /// ```
    pub fn valid_transitions(&self) -> &[CorrectionStatus] {
        match self {
            Self::Idle => &[Self::Submitting],
            Self::Submitting => &[Self::Succeeded, Self::Failed],
            Self::Failed => &[Self::Submitting],
            Self::Succeeded => &[],
        }
    }

    /// Check whether transitioning to `target` is allowed from the current state.
    pub fn can_transition_to(&self, target: &CorrectionStatus) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Whether a submission is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

impl std::fmt::Display for CorrectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Submitting => write!(f, "Submitting"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Error returned when an invalid correction status transition is attempted.
#[derive(Debug, thiserror::Error)]
#[error("Invalid correction transition from {from} to {to}")]
pub struct CorrectionTransitionError {
    pub from: CorrectionStatus,
    pub to: CorrectionStatus,
}
