//! Shared types for the Stache code generator.
//!
//! This crate defines the template tag tree handed over by the parser,
//! source spans, and the structured diagnostics reported back to tooling.

mod error;
mod span;
pub mod ast;

pub use error::{ErrorCategory, ErrorCode, StacheError};
pub use span::Span;

/// Result type used throughout the Stache compiler.
pub type Result<T> = std::result::Result<T, StacheError>;
