//! Generation flows.
//!
//! Each flow is one caller-facing operation: a chat turn, standalone image
//! generation, title generation, and response regeneration. Flows hold
//! their dependencies behind the ports and are cheap to construct per
//! request.

mod chat;
mod generate_image;
mod generate_title;
mod regenerate;
mod tool_executor;

pub use chat::{ChatError, ChatFlow, ChatInput};
pub use generate_image::{GeneratedImage, GenerateImageFlow, GenerateImageInput, ImageFlowError};
pub use generate_title::{GeneratedTitle, GenerateTitleFlow, GenerateTitleInput, TitleFlowError};
pub use regenerate::{RegenerateFlow, RegenerateInput, RegenerateError, RegeneratedResponse};
pub use tool_executor::{ChatToolExecutor, ToolExecution, ToolExecutionError};

/// Model identifiers the flows generate with.
#[derive(Debug, Clone)]
pub struct FlowModels {
    /// Chat/text model.
    pub chat: String,
    /// Image generation model.
    pub image: String,
}

impl Default for FlowModels {
    fn default() -> Self {
        Self {
            chat: "gemini-2.5-flash".to_string(),
            image: "imagen-4.0-fast-generate-001".to_string(),
        }
    }
}
