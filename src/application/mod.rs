//! Application layer - the generation flows exposed to callers.

pub mod flows;
