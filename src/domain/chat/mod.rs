//! Chat domain - outcome of a conversational turn and the tool model.

pub mod tools;

mod outcome;

pub use outcome::{ChatOutcome, ChatReply};
