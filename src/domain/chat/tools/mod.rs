//! Chat tools - capabilities the model may invoke mid-turn.
//!
//! The model sees tool *definitions* (name + JSON schemas) and may answer
//! with a tool *call* (name + arguments). A call is parsed into a
//! [`ToolInvocation`], a closed enum of the tools this application actually
//! implements, so dispatch is an exhaustive match rather than a name lookup.

mod call;
mod definition;
mod registry;

pub use call::{ToolCall, ToolInvocation, ToolOutput};
pub use definition::ToolDefinition;
pub use registry::{ToolRegistry, IMAGE_GENERATION_TOOL_NAME, WEB_SEARCH_TOOL_NAME};
