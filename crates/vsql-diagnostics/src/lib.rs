//! vSQL diagnostics and error handling
//!
//! This crate provides the error handling infrastructure for the vSQL
//! implementation, including source spans, locations and the `VsqlError` type
//! shared by the parser and the evaluator.

mod error;
mod span;

pub use error::*;
pub use span::*;

/// Result type for vSQL operations
pub type Result<T> = std::result::Result<T, VsqlError>;
