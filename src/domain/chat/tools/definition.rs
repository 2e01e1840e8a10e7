//! Tool definition - schema and metadata for a tool.

use serde::{Deserialize, Serialize};

/// Definition of a tool the model may invoke.
///
/// Carries the documentation and JSON Schemas needed to describe the tool
/// to the model provider and to validate arguments before execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "webSearch").
    name: String,

    /// Human-readable description for the model.
    description: String,

    /// JSON Schema for the input arguments.
    parameters_schema: serde_json::Value,

    /// JSON Schema for the return value.
    returns_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Creates a new tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters_schema: serde_json::Value,
        returns_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_schema,
            returns_schema,
        }
    }

    /// Returns the tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameters schema.
    pub fn parameters_schema(&self) -> &serde_json::Value {
        &self.parameters_schema
    }

    /// Returns the returns schema.
    pub fn returns_schema(&self) -> &serde_json::Value {
        &self.returns_schema
    }

    /// Converts to the Gemini `functionDeclarations` entry format.
    pub fn to_gemini_format(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters_schema
        })
    }
}
