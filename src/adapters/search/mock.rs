//! Mock Search Provider for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{SearchError, SearchProvider, SearchResult, SearchResults};

/// Mock search provider with scripted outcomes and query recording.
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    /// Scripted outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<Result<SearchResults, SearchError>>>>,
    /// Recorded queries.
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearchProvider {
    /// Creates a mock with no scripted outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful result set built from `(title, content)` pairs.
    pub fn with_results(self, entries: &[(&str, &str)]) -> Self {
        let results = SearchResults {
            results: entries
                .iter()
                .map(|(title, content)| SearchResult {
                    title: Some(title.to_string()),
                    url: Some(format!("https://example.com/{}", title.replace(' ', "-"))),
                    content: Some(content.to_string()),
                    score: Some(0.9),
                })
                .collect(),
        };
        self.outcomes.lock().unwrap().push_back(Ok(results));
        self
    }

    /// Queues an error outcome.
    pub fn with_error(self, error: SearchError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns the queries made so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SearchResults::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_scripted_results_and_records_queries() {
        let provider = MockSearchProvider::new()
            .with_results(&[("Weather", "Sunny in Paris")]);

        let results = provider.search("weather in Paris").await.unwrap();

        assert_eq!(results.results.len(), 1);
        assert_eq!(results.results[0].title.as_deref(), Some("Weather"));
        assert_eq!(provider.queries(), vec!["weather in Paris"]);
    }

    #[tokio::test]
    async fn exhausted_script_returns_empty_results() {
        let provider = MockSearchProvider::new();
        let results = provider.search("anything").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn scripted_error_is_returned() {
        let provider =
            MockSearchProvider::new().with_error(SearchError::upstream(500, "boom"));
        let err = provider.search("anything").await.unwrap_err();
        assert!(matches!(err, SearchError::Upstream { status: 500, .. }));
    }
}
