//! Web search provider configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::ai::fill_secret;
use super::error::ValidationError;

/// Tavily search configuration.
///
/// The credential is optional: without it the service still runs, and the
/// web search tool fails with a missing-credential error when invoked.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Tavily API key
    pub tavily_api_key: Option<Secret<String>>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Search depth ("basic" or "advanced")
    #[serde(default = "default_search_depth")]
    pub search_depth: String,

    /// Maximum results per query
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if the search credential is configured
    pub fn has_key(&self) -> bool {
        self.tavily_api_key.is_some()
    }

    /// Fills an absent key from the well-known flat environment variable.
    pub(super) fn fill_from_well_known_env(&mut self) {
        fill_secret(&mut self.tavily_api_key, "TAVILY_API_KEY");
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.search_depth.as_str() {
            "basic" | "advanced" => {}
            _ => return Err(ValidationError::InvalidSearchDepth),
        }
        if self.max_results == 0 {
            return Err(ValidationError::InvalidMaxResults);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tavily_api_key: None,
            base_url: default_base_url(),
            search_depth: default_search_depth(),
            max_results: default_max_results(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_search_depth() -> String {
    "basic".to_string()
}

fn default_max_results() -> u32 {
    5
}

fn default_timeout() -> u64 {
    30
}
