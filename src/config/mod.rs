//! Configuration management

use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub collaborators: CollaboratorConfig,
    pub advisory: AdvisoryConfig,
    pub logging: LoggingConfig,
}

/// Collaborator endpoint configuration
///
/// One backend serves all four collaborator operations; every call runs
/// under `request_timeout_seconds` and resolves to a failure state instead
/// of hanging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorConfig {
    /// Base URL of the document backend
    pub base_url: String,
    /// Timeout for individual requests (in seconds)
    pub request_timeout_seconds: u64,
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_seconds: 60,
        }
    }
}

/// Advisory suggestion cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Time-to-live for cached suggestions (in seconds)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached entries (one per view mode in practice)
    pub cache_max_entries: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 3600,
            cache_max_entries: 16,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridable via `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
