//! Metadata suggestion client configuration.

use serde::{Deserialize, Serialize};

/// Outbound metadata-search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Base URL of the metadata API (`/search.json` is appended).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Result count used when the caller gives none.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Upper bound on the caller-supplied limit.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_limit() -> usize {
    8
}

fn default_max_limit() -> usize {
    50
}
