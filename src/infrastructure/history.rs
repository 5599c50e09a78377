//! Cross-report history store seam
//!
//! History persistence lives outside the engine; sessions only ever append
//! through this narrow interface. No reads, no updates, no shared mutable
//! state between documents.

use std::sync::Mutex;

use tracing::debug;

use crate::domain::report::ReportHistoryEntry;

/// Append-only store for report history entries
pub trait HistoryStore: Send + Sync {
    /// Append one entry. Implementations must not fail the caller; history is
    /// best-effort and never blocks report handling.
    fn add_entry(&self, entry: ReportHistoryEntry);
}

/// In-memory history store for tests and single-process use
#[derive(Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<Vec<ReportHistoryEntry>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the appended entries, in arrival order.
    pub fn entries(&self) -> Vec<ReportHistoryEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn add_entry(&self, entry: ReportHistoryEntry) {
        debug!(filename = %entry.filename, score = entry.grade.score, "History entry appended");
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

/// History store that drops every entry (for callers without history)
#[derive(Default)]
pub struct NoopHistoryStore;

impl HistoryStore for NoopHistoryStore {
    fn add_entry(&self, _entry: ReportHistoryEntry) {}
}
