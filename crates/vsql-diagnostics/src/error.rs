//! vSQL error types

use crate::SourceLocation;
use thiserror::Error;

/// Main vSQL error type
///
/// Expressions fail in exactly one of four ways: the source does not parse
/// (`Syntax`), a name cannot be resolved (`Name`), an operator or function is
/// applied to operands of the wrong type (`Type`), or a value is outside the
/// domain of an operation (`Range`).
#[derive(Debug, Clone, Error)]
pub enum VsqlError {
    /// Parse error
    #[error("syntax error: {message}")]
    Syntax {
        message: String,
        expression: String,
        location: Option<SourceLocation>,
    },

    /// Unknown identifier, field, parameter or function name
    #[error("name error: {message}")]
    Name { message: String },

    /// Operand or argument type mismatch
    #[error("type error: {message}")]
    Type { message: String },

    /// Value outside the domain of an operation
    #[error("range error: {message}")]
    Range { message: String },
}

impl VsqlError {
    /// Create a syntax error without location information
    pub fn syntax(message: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            expression: expression.into(),
            location: None,
        }
    }

    /// Create a syntax error with a location
    pub fn syntax_at(
        message: impl Into<String>,
        expression: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::Syntax {
            message: message.into(),
            expression: expression.into(),
            location: Some(location),
        }
    }

    /// Create a name error
    pub fn name(message: impl Into<String>) -> Self {
        Self::Name {
            message: message.into(),
        }
    }

    /// Create a type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type {
            message: message.into(),
        }
    }

    /// Create a range error
    pub fn range(message: impl Into<String>) -> Self {
        Self::Range {
            message: message.into(),
        }
    }

    /// Get the location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Syntax { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    /// Get the error message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. }
            | Self::Name { message }
            | Self::Type { message }
            | Self::Range { message } => message,
        }
    }
}
