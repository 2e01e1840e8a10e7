//! Tavily Search Provider - web search over the Tavily REST API.
//!
//! One POST per query. The credential is optional at construction time so
//! the service can start without it; calls then fail with
//! [`SearchError::MissingCredential`].

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{SearchError, SearchProvider, SearchResults};

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Configuration for the Tavily provider.
#[derive(Debug, Clone)]
pub struct TavilyConfig {
    /// API key; absent means search is unconfigured.
    api_key: Option<Secret<String>>,
    /// Base URL for the API.
    pub base_url: String,
    /// Search depth ("basic" or "advanced").
    pub search_depth: String,
    /// Maximum number of results per query.
    pub max_results: u32,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TavilyConfig {
    /// Creates a configuration with the given (possibly absent) API key.
    pub fn new(api_key: Option<Secret<String>>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            search_depth: "basic".to_string(),
            max_results: 5,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the search depth.
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }

    /// Sets the maximum result count.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Tavily search API provider.
pub struct TavilySearchProvider {
    config: TavilyConfig,
    client: Client,
}

impl TavilySearchProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: TavilyConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url)
    }
}

#[async_trait]
impl SearchProvider for TavilySearchProvider {
    async fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(SearchError::MissingCredential)?;

        let body = TavilyRequest {
            api_key: api_key.expose_secret(),
            q: query,
            search_depth: &self.config.search_depth,
            include_answer: false,
            include_images: false,
            max_results: self.config.max_results,
        };

        let response = self
            .client
            .post(self.search_url())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::upstream(status.as_u16(), body));
        }

        response
            .json::<SearchResults>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }
}

/// Tavily search request body.
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    q: &'a str,
    search_depth: &'a str,
    include_answer: bool,
    include_images: bool,
    max_results: u32,
}
