//! Chat flow - one conversational turn.
//!
//! A turn is a single async call chain: one model call with the tool
//! registry attached, then - only if the model asked for a tool - the tool
//! execution and, for search, a second model call that synthesizes the
//! final answer from the tool's result. Image results end the turn
//! directly, without a second call.
//!
//! Only the first tool call in a model response is honored; multi-tool
//! turns are out of scope.
//!
//! Every failure inside the turn is folded into
//! [`ChatError::GenerationFailed`]; the caller decides how to present it
//! and what to persist.

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::chat::tools::{ToolInvocation, ToolOutput, ToolRegistry};
use crate::domain::chat::ChatOutcome;
use crate::domain::foundation::ValidationError;
use crate::ports::{GenerationError, GenerationRequest, GenerationResponse, Generator, SearchProvider};

use super::tool_executor::{ChatToolExecutor, ToolExecution, ToolExecutionError};
use super::FlowModels;

/// Input for a chat turn.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// The user prompt for this turn.
    pub prompt: String,
}

impl ChatInput {
    /// Creates a new chat input.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Errors from a chat turn.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// Prompt is empty or whitespace only.
    #[error("message cannot be empty")]
    EmptyPrompt,

    /// The turn failed; the single error path the orchestrator exposes.
    #[error("AI response generation failed: {0}")]
    GenerationFailed(String),
}

impl From<GenerationError> for ChatError {
    fn from(err: GenerationError) -> Self {
        ChatError::GenerationFailed(err.to_string())
    }
}

impl From<ToolExecutionError> for ChatError {
    fn from(err: ToolExecutionError) -> Self {
        ChatError::GenerationFailed(err.to_string())
    }
}

impl From<ValidationError> for ChatError {
    fn from(err: ValidationError) -> Self {
        ChatError::GenerationFailed(err.to_string())
    }
}

/// Orchestrator for one chat turn.
pub struct ChatFlow<G: Generator + ?Sized, S: SearchProvider + ?Sized> {
    generator: Arc<G>,
    executor: ChatToolExecutor<G, S>,
    registry: ToolRegistry,
    models: FlowModels,
}

impl<G: Generator + ?Sized, S: SearchProvider + ?Sized> ChatFlow<G, S> {
    /// Creates the flow with the standard chat tools.
    pub fn new(generator: Arc<G>, search: Arc<S>, models: FlowModels) -> Self {
        let executor =
            ChatToolExecutor::new(Arc::clone(&generator), search, models.image.clone());
        Self {
            generator,
            executor,
            registry: ToolRegistry::chat_defaults(),
            models,
        }
    }

    /// Runs one chat turn.
    pub async fn execute(&self, input: ChatInput) -> Result<ChatOutcome, ChatError> {
        let prompt = input.prompt.trim();
        if prompt.is_empty() {
            return Err(ChatError::EmptyPrompt);
        }

        let turn_id = Uuid::new_v4();
        tracing::debug!(%turn_id, "starting chat turn");

        let request = GenerationRequest::new(&self.models.chat)
            .with_user_text(prompt)
            .with_tools(self.registry.definitions().to_vec());

        let response = self.generator.generate(request).await?;

        let call = match response {
            GenerationResponse::Text(text) => {
                tracing::debug!(%turn_id, "model answered directly");
                return Ok(ChatOutcome::Text { response: text });
            }
            GenerationResponse::ToolCall(call) => call,
            GenerationResponse::Media(_) => {
                return Err(ChatError::GenerationFailed(
                    "chat model returned media instead of text or a tool call".to_string(),
                ));
            }
        };

        let invocation = ToolInvocation::parse(&call)?;
        tracing::info!(%turn_id, tool = invocation.tool_name(), "model requested a tool");

        match self.executor.execute(invocation).await? {
            ToolExecution::ImageGeneration { image_url } => {
                // Image results go back as-is; no second model call.
                Ok(ChatOutcome::Image { image_url })
            }
            ToolExecution::WebSearch { results } => {
                let payload = serde_json::to_value(&results)
                    .map_err(|e| ChatError::GenerationFailed(e.to_string()))?;
                let output = ToolOutput::new(call.name.clone(), payload);

                let followup = GenerationRequest::new(&self.models.chat)
                    .with_user_text(prompt)
                    .with_model_tool_call(call)
                    .with_tool_output(output);

                match self.generator.generate(followup).await? {
                    GenerationResponse::Text(text) => {
                        tracing::debug!(%turn_id, "synthesized answer from search results");
                        Ok(ChatOutcome::SearchAnswer { response: text })
                    }
                    _ => Err(ChatError::GenerationFailed(
                        "model did not produce text after the tool result".to_string(),
                    )),
                }
            }
        }
    }
}
