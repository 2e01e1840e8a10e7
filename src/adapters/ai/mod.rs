//! AI adapters - Gemini backend, key-pool failover, and test doubles.

mod gemini;
mod key_pool;
mod mock;
mod resilient;

pub use gemini::{GeminiBackend, GeminiConfig};
pub use key_pool::KeyPool;
pub use mock::{MockGenerator, ScriptedResponse};
pub use resilient::{GenerationBackend, ResilientGenerator};
