//! Search Provider Port - interface for web search integrations.
//!
//! The chat flow feeds search results back to the model verbatim, so the
//! result shape stays close to the provider's JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for web search providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs a web search for the given query.
    async fn search(&self, query: &str) -> Result<SearchResults, SearchError>;
}

/// A page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Result entries, most relevant first.
    pub results: Vec<SearchResult>,
}

impl SearchResults {
    /// Returns true if the search produced no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A single search result.
///
/// Fields are optional because providers omit them freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Extracted page content or snippet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Provider relevance score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Web search errors.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// No search API key is configured.
    #[error("search API key is not configured")]
    MissingCredential,

    /// The provider responded with a non-success status.
    #[error("search provider returned status {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SearchError {
    /// Creates an upstream error.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_deserialize_from_provider_json() {
        let json = serde_json::json!({
            "results": [
                {
                    "title": "Weather in Paris",
                    "url": "https://example.com/paris",
                    "content": "Sunny, 24C",
                    "score": 0.97
                },
                { "url": "https://example.com/bare" }
            ]
        });

        let results: SearchResults = serde_json::from_value(json).unwrap();
        assert_eq!(results.results.len(), 2);
        assert_eq!(
            results.results[0].title.as_deref(),
            Some("Weather in Paris")
        );
        assert!(results.results[1].title.is_none());
        assert!(!results.is_empty());
    }

    #[test]
    fn empty_results_report_empty() {
        let results = SearchResults::default();
        assert!(results.is_empty());
    }

    #[test]
    fn upstream_error_displays_status() {
        let err = SearchError::upstream(500, "internal error");
        assert_eq!(
            err.to_string(),
            "search provider returned status 500: internal error"
        );
    }

    #[test]
    fn missing_credential_message_is_actionable() {
        assert_eq!(
            SearchError::MissingCredential.to_string(),
            "search API key is not configured"
        );
    }
}
