//! Search adapters - Tavily provider and test double.

mod mock;
mod tavily;

pub use mock::MockSearchProvider;
pub use tavily::{TavilyConfig, TavilySearchProvider};
