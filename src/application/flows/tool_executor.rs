//! Tool Executor - runs a validated tool invocation.
//!
//! Dispatch is an exhaustive match over [`ToolInvocation`]; adding a tool
//! means adding a variant and a branch here.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::chat::tools::ToolInvocation;
use crate::ports::{Generator, SearchError, SearchProvider, SearchResults};

use super::generate_image::{GenerateImageFlow, GenerateImageInput};

/// Errors that can occur while executing a tool.
#[derive(Debug, Clone, Error)]
pub enum ToolExecutionError {
    /// The tool's provider credential is not configured.
    #[error("tool credential is not configured: {0}")]
    MissingCredential(String),

    /// The tool's upstream service failed.
    #[error("tool upstream error: {0}")]
    UpstreamError(String),

    /// A nested generation call failed or produced no output.
    #[error("tool generation failure: {0}")]
    GenerationFailure(String),
}

impl From<SearchError> for ToolExecutionError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::MissingCredential => {
                ToolExecutionError::MissingCredential(err.to_string())
            }
            SearchError::Upstream { .. } | SearchError::Network(_) | SearchError::Parse(_) => {
                ToolExecutionError::UpstreamError(err.to_string())
            }
        }
    }
}

/// The result of executing a tool, by tool identity.
#[derive(Debug, Clone)]
pub enum ToolExecution {
    /// Web search results, to be fed back to the model.
    WebSearch { results: SearchResults },
    /// A generated image; the chat turn ends with it directly.
    ImageGeneration { image_url: String },
}

/// Executor for the chat tools.
pub struct ChatToolExecutor<G: Generator + ?Sized, S: SearchProvider + ?Sized> {
    search: Arc<S>,
    images: GenerateImageFlow<G>,
}

impl<G: Generator + ?Sized, S: SearchProvider + ?Sized> ChatToolExecutor<G, S> {
    /// Creates an executor over the given providers.
    pub fn new(generator: Arc<G>, search: Arc<S>, image_model: impl Into<String>) -> Self {
        Self {
            search,
            images: GenerateImageFlow::new(generator, image_model),
        }
    }

    /// Executes a validated tool invocation.
    pub async fn execute(
        &self,
        invocation: ToolInvocation,
    ) -> Result<ToolExecution, ToolExecutionError> {
        match invocation {
            ToolInvocation::WebSearch { query } => {
                let results = self.search.search(&query).await?;
                Ok(ToolExecution::WebSearch { results })
            }
            ToolInvocation::ImageGeneration { prompt } => {
                let image = self
                    .images
                    .execute(GenerateImageInput::new(prompt))
                    .await
                    .map_err(|e| ToolExecutionError::GenerationFailure(e.to_string()))?;
                Ok(ToolExecution::ImageGeneration {
                    image_url: image.image_url,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerator;
    use crate::adapters::search::MockSearchProvider;

    fn executor(
        generator: MockGenerator,
        search: MockSearchProvider,
    ) -> ChatToolExecutor<MockGenerator, MockSearchProvider> {
        ChatToolExecutor::new(Arc::new(generator), Arc::new(search), "imagen-test")
    }

    #[tokio::test]
    async fn web_search_returns_provider_results() {
        let search = MockSearchProvider::new().with_results(&[("Paris", "Sunny, 24C")]);
        let executor = executor(MockGenerator::new(), search.clone());

        let execution = executor
            .execute(ToolInvocation::WebSearch {
                query: "weather in Paris".to_string(),
            })
            .await
            .unwrap();

        match execution {
            ToolExecution::WebSearch { results } => {
                assert_eq!(results.results.len(), 1);
            }
            other => panic!("expected web search result, got {:?}", other),
        }
        assert_eq!(search.queries(), vec!["weather in Paris"]);
    }

    #[tokio::test]
    async fn missing_search_key_maps_to_missing_credential() {
        let search = MockSearchProvider::new().with_error(SearchError::MissingCredential);
        let executor = executor(MockGenerator::new(), search);

        let err = executor
            .execute(ToolInvocation::WebSearch {
                query: "anything".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ToolExecutionError::MissingCredential(_)));
    }

    #[tokio::test]
    async fn search_http_failure_maps_to_upstream() {
        let search =
            MockSearchProvider::new().with_error(SearchError::upstream(500, "internal"));
        let executor = executor(MockGenerator::new(), search);

        let err = executor
            .execute(ToolInvocation::WebSearch {
                query: "anything".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ToolExecutionError::UpstreamError(_)));
    }

    #[tokio::test]
    async fn image_generation_returns_data_uri() {
        let generator = MockGenerator::new().with_media("data:image/png;base64,AAAA");
        let executor = executor(generator, MockSearchProvider::new());

        let execution = executor
            .execute(ToolInvocation::ImageGeneration {
                prompt: "a cat".to_string(),
            })
            .await
            .unwrap();

        match execution {
            ToolExecution::ImageGeneration { image_url } => {
                assert_eq!(image_url, "data:image/png;base64,AAAA");
            }
            other => panic!("expected image result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn image_flow_failure_maps_to_generation_failure() {
        // Model answers with text instead of media.
        let generator = MockGenerator::new().with_text("no image for you");
        let executor = executor(generator, MockSearchProvider::new());

        let err = executor
            .execute(ToolInvocation::ImageGeneration {
                prompt: "a cat".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ToolExecutionError::GenerationFailure(_)));
    }
}
