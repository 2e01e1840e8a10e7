//! Generator Port - interface for model generation calls.
//!
//! Abstracts the model provider behind a single `generate` call. A request
//! is a role-tagged prompt plus optional tool definitions; a response is
//! exactly one of free text, a tool call, or generated media.
//!
//! # Example
//!
//! ```ignore
//! let request = GenerationRequest::new("gemini-2.5-flash")
//!     .with_user_text("What is 2+2?")
//!     .with_tools(registry.definitions().to_vec());
//!
//! match generator.generate(request).await? {
//!     GenerationResponse::Text(text) => println!("{text}"),
//!     GenerationResponse::ToolCall(call) => run_tool(call),
//!     GenerationResponse::Media(media) => save(media.url),
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chat::tools::{ToolCall, ToolDefinition, ToolOutput};

/// Port for model generation calls.
///
/// Implementations resolve credentials, talk to the provider, and translate
/// its wire format into [`GenerationResponse`].
#[async_trait]
pub trait Generator: Send + Sync {
    /// Runs a single generation call.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;
}

/// Role of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    /// End-user input.
    User,
    /// A previous model response (including tool calls it made).
    Model,
    /// The result of a tool execution.
    Tool,
}

/// One part of a prompt message.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    /// Plain text content.
    Text(String),
    /// A tool call previously emitted by the model.
    ToolCall(ToolCall),
    /// The output of an executed tool.
    ToolResult(ToolOutput),
}

/// A role-tagged message in a generation prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptMessage {
    /// Who produced this message.
    pub role: PromptRole,
    /// Ordered content parts.
    pub parts: Vec<PromptPart>,
}

impl PromptMessage {
    /// Creates a message with a single part.
    pub fn new(role: PromptRole, part: PromptPart) -> Self {
        Self {
            role,
            parts: vec![part],
        }
    }

    /// Creates a user message containing text.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(PromptRole::User, PromptPart::Text(text.into()))
    }
}

/// Request for one model generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Model identifier (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Conversation so far, oldest first.
    pub messages: Vec<PromptMessage>,
    /// Tools the model may invoke in this call.
    pub tools: Vec<ToolDefinition>,
}

impl GenerationRequest {
    /// Creates a request for the given model with no messages or tools.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            tools: Vec::new(),
        }
    }

    /// Appends a user text message.
    pub fn with_user_text(mut self, text: impl Into<String>) -> Self {
        self.messages.push(PromptMessage::user_text(text));
        self
    }

    /// Appends a model message replaying a tool call it made.
    pub fn with_model_tool_call(mut self, call: ToolCall) -> Self {
        self.messages
            .push(PromptMessage::new(PromptRole::Model, PromptPart::ToolCall(call)));
        self
    }

    /// Appends a tool message carrying an execution result.
    pub fn with_tool_output(mut self, output: ToolOutput) -> Self {
        self.messages.push(PromptMessage::new(
            PromptRole::Tool,
            PromptPart::ToolResult(output),
        ));
        self
    }

    /// Sets the tools offered to the model.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }
}

/// Generated media returned by an image model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMedia {
    /// Media URL; a `data:` URI for inline payloads.
    pub url: String,
    /// MIME type of the media, when reported by the provider.
    pub mime_type: Option<String>,
}

/// The model's output for one call - exactly one content modality.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResponse {
    /// Free-text content.
    Text(String),
    /// A structured tool-call request.
    ToolCall(ToolCall),
    /// Generated media (image models).
    Media(GeneratedMedia),
}

impl GenerationResponse {
    /// Returns the text content, if this is a text response.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GenerationResponse::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true if this response is a tool call.
    pub fn is_tool_call(&self) -> bool {
        matches!(self, GenerationResponse::ToolCall(_))
    }
}

/// Model generation errors.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// Every credential in the pool failed for this invocation.
    #[error("all credentials exhausted after {attempts} attempt(s)")]
    AllCredentialsExhausted {
        /// Number of credentials tried.
        attempts: usize,
    },

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// API key was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider is unavailable (5xx).
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// The model produced no usable output.
    #[error("model returned no output")]
    NoOutput,
}

impl GenerationError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
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
