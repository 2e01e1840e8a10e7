//! Foundation module - value objects and errors shared across the domain.

mod errors;

pub use errors::ValidationError;
