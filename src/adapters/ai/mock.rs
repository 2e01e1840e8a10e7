//! Mock Generator for testing.
//!
//! Configurable implementation of the [`Generator`] port so flow and HTTP
//! tests run without calling the real API.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockGenerator::new()
//!     .with_text("Hello!")
//!     .with_tool_call("webSearch", serde_json::json!({ "query": "rust" }));
//!
//! let response = generator.generate(request).await?;
//! assert_eq!(generator.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::chat::tools::ToolCall;
use crate::ports::{
    GeneratedMedia, GenerationError, GenerationRequest, GenerationResponse, Generator,
};

/// A scripted response consumed by [`MockGenerator`], in order.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Return a successful response.
    Success(GenerationResponse),
    /// Return an error.
    Error(GenerationError),
}

/// Mock generator with scripted responses and call recording.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    /// Scripted responses (consumed in order).
    responses: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    /// Recorded requests for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Creates a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a text response.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(ScriptedResponse::Success(GenerationResponse::Text(
            text.into(),
        )))
    }

    /// Queues a tool-call response.
    pub fn with_tool_call(self, name: impl Into<String>, arguments: serde_json::Value) -> Self {
        self.push(ScriptedResponse::Success(GenerationResponse::ToolCall(
            ToolCall::new(name, arguments),
        )))
    }

    /// Queues a media response.
    pub fn with_media(self, url: impl Into<String>) -> Self {
        self.push(ScriptedResponse::Success(GenerationResponse::Media(
            GeneratedMedia {
                url: url.into(),
                mime_type: Some("image/png".to_string()),
            },
        )))
    }

    /// Queues an error.
    pub fn with_error(self, error: GenerationError) -> Self {
        self.push(ScriptedResponse::Error(error))
    }

    fn push(self, response: ScriptedResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Returns the number of generate calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.calls.lock().unwrap().push(request);

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ScriptedResponse::Error(GenerationError::NoOutput));

        match scripted {
            ScriptedResponse::Success(response) => Ok(response),
            ScriptedResponse::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::new("gemini-2.5-flash").with_user_text("hello")
    }

    #[tokio::test]
    async fn returns_scripted_responses_in_order() {
        let generator = MockGenerator::new().with_text("first").with_text("second");

        let r1 = generator.generate(request()).await.unwrap();
        let r2 = generator.generate(request()).await.unwrap();

        assert_eq!(r1.as_text(), Some("first"));
        assert_eq!(r2.as_text(), Some("second"));
    }

    #[tokio::test]
    async fn exhausted_script_errors_with_no_output() {
        let generator = MockGenerator::new();
        let err = generator.generate(request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::NoOutput));
    }

    #[tokio::test]
    async fn records_calls_for_verification() {
        let generator = MockGenerator::new().with_text("hi");

        assert_eq!(generator.call_count(), 0);
        generator.generate(request()).await.unwrap();

        assert_eq!(generator.call_count(), 1);
        assert_eq!(generator.calls()[0].model, "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn scripted_error_is_returned() {
        let generator =
            MockGenerator::new().with_error(GenerationError::rate_limited(30));
        let err = generator.generate(request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn tool_call_and_media_scripts_round_trip() {
        let generator = MockGenerator::new()
            .with_tool_call("webSearch", serde_json::json!({ "query": "rust" }))
            .with_media("data:image/png;base64,AAAA");

        let call = generator.generate(request()).await.unwrap();
        assert!(call.is_tool_call());

        let media = generator.generate(request()).await.unwrap();
        assert!(matches!(media, GenerationResponse::Media(_)));
    }
}
