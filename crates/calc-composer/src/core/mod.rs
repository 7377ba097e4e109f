//! Arithmetic engine behind the composer
//!
//! Tokenizes, parses and evaluates the normalized expression text, and turns
//! the numeric outcome into display text.

pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;

pub use operations::{Arithmetic, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Three classes cross the engine boundary:
/// - arithmetic failures ([`CalcError::is_arithmetic`]), absorbed into an
///   error display by the result evaluator
/// - syntax failures ([`CalcError::is_syntax`]), which propagate
/// - incomplete expressions, raised before the engine is ever reached
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Equals requested while the buffer ends in an operator or is flagged erroneous
    #[error("{message}")]
    IncompleteExpression {
        /// Host-supplied incomplete-expression text
        message: String,
    },

    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    Syntax(String),

    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,

    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,

    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,

    /// Invalid result (NaN)
    #[error("Invalid result: {0}")]
    InvalidResult(String),

    /// Text resources are unusable
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl CalcError {
    /// Create an incomplete-expression error
    #[must_use]
    pub fn incomplete(message: impl Into<String>) -> Self {
        Self::IncompleteExpression {
            message: message.into(),
        }
    }

    /// Create a syntax error
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true for failures of the arithmetic itself (recoverable)
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::DivisionByZero | Self::Overflow | Self::InvalidResult(_)
        )
    }

    /// Returns true for malformed-expression failures
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_) | Self::EmptyExpression)
    }
}
