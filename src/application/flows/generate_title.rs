//! Chat title flow.
//!
//! Produces a concise title for a conversation so the sidebar can label it.

use std::sync::Arc;
use thiserror::Error;

use crate::ports::{GenerationRequest, Generator};

/// Prompt template for title generation.
const TITLE_PROMPT: &str = "You are an AI that generates concise titles for chat conversations.\n\n\
Generate a title that accurately reflects the main topics discussed in the following conversation.\n\n\
Conversation: {conversation}\n\
Title:";

/// Input for title generation.
#[derive(Debug, Clone)]
pub struct GenerateTitleInput {
    /// The complete conversation content to generate the title from.
    pub conversation: String,
}

impl GenerateTitleInput {
    /// Creates a new input.
    pub fn new(conversation: impl Into<String>) -> Self {
        Self {
            conversation: conversation.into(),
        }
    }
}

/// A generated conversation title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTitle {
    /// The title text.
    pub title: String,
}

/// Errors from the title flow.
#[derive(Debug, Clone, Error)]
pub enum TitleFlowError {
    /// Conversation content is empty or whitespace only.
    #[error("conversation content cannot be empty")]
    EmptyConversation,

    /// The model call failed or produced no title.
    #[error("title generation failed: {0}")]
    GenerationFailed(String),
}

/// Flow generating a conversation title.
pub struct GenerateTitleFlow<G: Generator + ?Sized> {
    generator: Arc<G>,
    model: String,
}

impl<G: Generator + ?Sized> GenerateTitleFlow<G> {
    /// Creates the flow over the given generator and chat model.
    pub fn new(generator: Arc<G>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Generates a title for the conversation.
    pub async fn execute(
        &self,
        input: GenerateTitleInput,
    ) -> Result<GeneratedTitle, TitleFlowError> {
        let conversation = input.conversation.trim();
        if conversation.is_empty() {
            return Err(TitleFlowError::EmptyConversation);
        }

        let prompt = TITLE_PROMPT.replace("{conversation}", conversation);
        let request = GenerationRequest::new(&self.model).with_user_text(prompt);

        let response = self
            .generator
            .generate(request)
            .await
            .map_err(|e| TitleFlowError::GenerationFailed(e.to_string()))?;

        let title = response
            .as_text()
            .map(|t| t.trim().trim_matches('"').trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                TitleFlowError::GenerationFailed("model produced no title text".to_string())
            })?;

        Ok(GeneratedTitle { title })
    }
}
