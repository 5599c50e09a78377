//! Advisory suggestion cache: AI remediation text per view mode

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, info, warn};

use crate::application::errors::EngineError;
use crate::config::AdvisoryConfig;
use crate::domain::report::{RawCheckResults, ViewMode};
use crate::infrastructure::collaborators::{AdvisoryRequest, AdvisoryService};

/// Fetches and caches advisory (AI) remediation text, keyed by view mode
///
/// Each view mode has its own cache slot and its own error state: a failed
/// fetch for one mode never clears a previously cached suggestion for the
/// other. Overlapping requests for the same mode follow last-write-wins; a
/// superseded completion is discarded.
pub struct AdvisorySuggestionCache {
    service: Arc<dyn AdvisoryService>,
    cache: Cache<ViewMode, String>,
    errors: Mutex<HashMap<ViewMode, String>>,
    generations: Mutex<HashMap<ViewMode, u64>>,
    sequence: AtomicU64,
}

impl AdvisorySuggestionCache {
    pub fn new(service: Arc<dyn AdvisoryService>, config: &AdvisoryConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_max_entries)
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .build();

        Self {
            service,
            cache,
            errors: Mutex::new(HashMap::new()),
            generations: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Warm the cache with advisory text that arrived with the analyzer
    /// payload.
    pub async fn seed(&self, mode: ViewMode, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.cache.insert(mode, text).await;
        }
    }

    /// Record an advisory error reported by the analyzer pipeline.
    pub fn seed_error(&self, mode: ViewMode, message: impl Into<String>) {
        self.lock_errors().insert(mode, message.into());
    }

    /// Warm the cache from the advisory text carried by a session's payload.
    pub async fn seed_from_session(&self, session: &crate::application::session::ReportSession) {
        if let Some(text) = session.advisory_seed(ViewMode::Pre) {
            self.seed(ViewMode::Pre, text).await;
        }
        if let Some(text) = session.advisory_seed(ViewMode::Post) {
            self.seed(ViewMode::Post, text).await;
        }
        if let Some(message) = session.advisory_seed_error() {
            self.seed_error(session.mode(), message);
        }
    }

    /// Cached suggestion for a mode, if any.
    pub async fn cached(&self, mode: ViewMode) -> Option<String> {
        self.cache.get(&mode).await
    }

    /// Error state for a mode, if its last fetch failed.
    pub fn error(&self, mode: ViewMode) -> Option<String> {
        self.lock_errors().get(&mode).cloned()
    }

    /// Fetch remediation suggestions for the active snapshot.
    ///
    /// Serves from cache unless `force_refresh` is set, in which case the
    /// collaborator is re-queried with the snapshot passed in (the currently
    /// active one). A successful fetch replaces the cache entry and clears
    /// the mode's error state; a failure records the error without evicting
    /// anything.
    pub async fn request_suggestions(
        &self,
        mode: ViewMode,
        snapshot: RawCheckResults,
        filename: &str,
        force_refresh: bool,
    ) -> Result<String, EngineError> {
        if !force_refresh {
            if let Some(cached) = self.cache.get(&mode).await {
                debug!(mode = %mode, "Serving advisory suggestions from cache");
                return Ok(cached);
            }
        }

        let generation = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock_generations().insert(mode, generation);

        info!(mode = %mode, force_refresh, "Requesting advisory suggestions");

        let request = AdvisoryRequest {
            check_results: snapshot,
            filename: filename.to_string(),
        };

        let outcome = match self.service.suggest(request).await {
            Ok(response) if response.success => Ok(response.suggestions.unwrap_or_default()),
            Ok(response) => Err(EngineError::service(
                response
                    .error
                    .unwrap_or_else(|| "Advisory service returned no suggestions".to_string()),
            )),
            Err(err) => Err(err),
        };

        // Only the latest request for this mode may update shared state.
        if self.lock_generations().get(&mode).copied() != Some(generation) {
            debug!(mode = %mode, "Discarding superseded advisory result");
            return outcome;
        }

        match &outcome {
            Ok(text) => {
                self.cache.insert(mode, text.clone()).await;
                self.lock_errors().remove(&mode);
            }
            Err(err) => {
                warn!(mode = %mode, error = %err, "Advisory fetch failed");
                self.lock_errors().insert(mode, err.to_string());
            }
        }

        outcome
    }

    fn lock_errors(&self) -> MutexGuard<'_, HashMap<ViewMode, String>> {
        self.errors.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_generations(&self) -> MutexGuard<'_, HashMap<ViewMode, u64>> {
        self.generations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
