//! Tool Registry - the tools offered to the model on a chat turn.

use once_cell::sync::Lazy;

use super::ToolDefinition;

/// Wire name of the web search tool.
pub const WEB_SEARCH_TOOL_NAME: &str = "webSearch";

/// Wire name of the image generation tool.
pub const IMAGE_GENERATION_TOOL_NAME: &str = "imageGeneration";

static WEB_SEARCH_DEFINITION: Lazy<ToolDefinition> = Lazy::new(|| {
    ToolDefinition::new(
        WEB_SEARCH_TOOL_NAME,
        "Search the web for information. Useful for current events or topics the AI is not trained on.",
        serde_json::json!({
            "type": "object",
            "required": ["query"],
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query."
                }
            }
        }),
        serde_json::json!({
            "type": "object",
            "properties": {
                "results": {
                    "type": "array",
                    "items": { "type": "object" }
                }
            }
        }),
    )
});

static IMAGE_GENERATION_DEFINITION: Lazy<ToolDefinition> = Lazy::new(|| {
    ToolDefinition::new(
        IMAGE_GENERATION_TOOL_NAME,
        "Generate an image from a text description. Use this when the user asks for an image, a picture, a drawing, etc.",
        serde_json::json!({
            "type": "object",
            "required": ["prompt"],
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The text description of the image to generate."
                }
            }
        }),
        serde_json::json!({
            "type": "object",
            "required": ["imageUrl"],
            "properties": {
                "imageUrl": {
                    "type": "string",
                    "description": "The URL of the generated image."
                }
            }
        }),
    )
});

/// Registry of the tools available to the chat model.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::chat_defaults()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Creates the registry with the standard chat tools (web search and
    /// image generation).
    pub fn chat_defaults() -> Self {
        Self {
            tools: vec![
                WEB_SEARCH_DEFINITION.clone(),
                IMAGE_GENERATION_DEFINITION.clone(),
            ],
        }
    }

    /// Registers an additional tool.
    pub fn register(&mut self, definition: ToolDefinition) {
        self.tools.push(definition);
    }

    /// Returns all registered tool definitions, in registration order.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Gets a tool definition by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Checks if a tool is registered.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
