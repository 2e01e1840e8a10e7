//! Regenerate flow.
//!
//! Produces a fresh assistant response for a prompt whose previous answer
//! the user rejected. No tools are offered; this is a plain text call.

use std::sync::Arc;
use thiserror::Error;

use crate::ports::{GenerationRequest, Generator};

/// Prompt template for regeneration.
const REGENERATE_PROMPT: &str =
    "Regenerate the AI response for the following prompt: {prompt}";

/// Input for response regeneration.
#[derive(Debug, Clone)]
pub struct RegenerateInput {
    /// The prompt to regenerate the response for.
    pub prompt: String,
}

impl RegenerateInput {
    /// Creates a new input.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// A regenerated assistant response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegeneratedResponse {
    /// The response text.
    pub response: String,
}

/// Errors from the regenerate flow.
#[derive(Debug, Clone, Error)]
pub enum RegenerateError {
    /// Prompt is empty or whitespace only.
    #[error("prompt cannot be empty")]
    EmptyPrompt,

    /// The model call failed or produced no text.
    #[error("response regeneration failed: {0}")]
    GenerationFailed(String),
}

/// Flow regenerating an assistant response.
pub struct RegenerateFlow<G: Generator + ?Sized> {
    generator: Arc<G>,
    model: String,
}

impl<G: Generator + ?Sized> RegenerateFlow<G> {
    /// Creates the flow over the given generator and chat model.
    pub fn new(generator: Arc<G>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Regenerates a response for the prompt.
    pub async fn execute(
        &self,
        input: RegenerateInput,
    ) -> Result<RegeneratedResponse, RegenerateError> {
        let prompt = input.prompt.trim();
        if prompt.is_empty() {
            return Err(RegenerateError::EmptyPrompt);
        }

        let prompt = REGENERATE_PROMPT.replace("{prompt}", prompt);
        let request = GenerationRequest::new(&self.model).with_user_text(prompt);

        let response = self
            .generator
            .generate(request)
            .await
            .map_err(|e| RegenerateError::GenerationFailed(e.to_string()))?;

        let response = response
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| {
                RegenerateError::GenerationFailed("model produced no text".to_string())
            })?;

        Ok(RegeneratedResponse { response })
    }
}
