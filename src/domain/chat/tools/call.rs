//! Tool call parsing - from raw model output to a typed invocation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::registry::{IMAGE_GENERATION_TOOL_NAME, WEB_SEARCH_TOOL_NAME};

/// A tool call as emitted by the model: a name and raw JSON arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the requested tool.
    pub name: String,
    /// Arguments as produced by the model, unvalidated.
    pub arguments: serde_json::Value,
}

impl ToolCall {
    /// Creates a new tool call.
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// The result of a tool execution, fed back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Name of the tool that produced this output.
    pub name: String,
    /// Output payload, matching the tool's returns schema.
    pub payload: serde_json::Value,
}

impl ToolOutput {
    /// Creates a new tool output.
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// A validated invocation of one of the known chat tools.
///
/// Parsing a [`ToolCall`] into this enum is the only place tool names are
/// compared as strings; everything downstream dispatches by matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    /// Search the web for the given query.
    WebSearch { query: String },
    /// Generate an image from the given description.
    ImageGeneration { prompt: String },
}

impl ToolInvocation {
    /// Parses and validates a raw tool call.
    ///
    /// Fails if the tool name is not one of the known tools, or if the
    /// required string argument is missing or empty.
    pub fn parse(call: &ToolCall) -> Result<Self, ValidationError> {
        match call.name.as_str() {
            WEB_SEARCH_TOOL_NAME => {
                let query = required_string(&call.arguments, "query")?;
                Ok(ToolInvocation::WebSearch { query })
            }
            IMAGE_GENERATION_TOOL_NAME => {
                let prompt = required_string(&call.arguments, "prompt")?;
                Ok(ToolInvocation::ImageGeneration { prompt })
            }
            other => Err(ValidationError::unknown_tool(other)),
        }
    }

    /// Returns the wire name of the invoked tool.
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolInvocation::WebSearch { .. } => WEB_SEARCH_TOOL_NAME,
            ToolInvocation::ImageGeneration { .. } => IMAGE_GENERATION_TOOL_NAME,
        }
    }
}

/// Extracts a required non-empty string field from a JSON arguments object.
fn required_string(arguments: &serde_json::Value, field: &str) -> Result<String, ValidationError> {
    let value = arguments
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            ValidationError::invalid_format(field, "expected a string argument")
        })?;

    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_web_search_call() {
        let call = ToolCall::new("webSearch", serde_json::json!({ "query": "weather in Paris" }));
        let invocation = ToolInvocation::parse(&call).unwrap();

        assert_eq!(
            invocation,
            ToolInvocation::WebSearch {
                query: "weather in Paris".to_string()
            }
        );
        assert_eq!(invocation.tool_name(), "webSearch");
    }

    #[test]
    fn parses_image_generation_call() {
        let call = ToolCall::new("imageGeneration", serde_json::json!({ "prompt": "a cat" }));
        let invocation = ToolInvocation::parse(&call).unwrap();

        assert_eq!(
            invocation,
            ToolInvocation::ImageGeneration {
                prompt: "a cat".to_string()
            }
        );
        assert_eq!(invocation.tool_name(), "imageGeneration");
    }

    #[test]
    fn rejects_unknown_tool() {
        let call = ToolCall::new("calculator", serde_json::json!({ "expr": "2+2" }));
        let err = ToolInvocation::parse(&call).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownTool { .. }));
    }

    #[test]
    fn rejects_missing_argument() {
        let call = ToolCall::new("webSearch", serde_json::json!({}));
        let err = ToolInvocation::parse(&call).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_non_string_argument() {
        let call = ToolCall::new("webSearch", serde_json::json!({ "query": 42 }));
        let err = ToolInvocation::parse(&call).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_blank_argument() {
        let call = ToolCall::new("imageGeneration", serde_json::json!({ "prompt": "   " }));
        let err = ToolInvocation::parse(&call).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
    }

    #[test]
    fn trims_argument_whitespace() {
        let call = ToolCall::new("webSearch", serde_json::json!({ "query": "  rust  " }));
        let invocation = ToolInvocation::parse(&call).unwrap();
        assert_eq!(
            invocation,
            ToolInvocation::WebSearch {
                query: "rust".to_string()
            }
        );
    }
}
