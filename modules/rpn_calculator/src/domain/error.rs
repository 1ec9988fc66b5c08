//! Domain error types for the RPN calculator.

use thiserror::Error;

use super::token::Operator;

/// Errors raised while evaluating a token sequence.
///
/// Every error ends the evaluation that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The token is neither an integer literal nor a known operator.
    #[error("Unrecognized token: {token:?}")]
    ParseError { token: String },

    /// An operator was applied with fewer than two values on the stack.
    #[error("Stack underflow: '{operator}' needs 2 operands, found {available}")]
    Underflow { operator: Operator, available: usize },

    /// More than one value remained after the last token.
    #[error("Incomplete expression: {remaining} values left on the stack")]
    IncompleteExpression { remaining: usize },

    /// No value remained after the last token.
    #[error("Empty expression")]
    EmptyExpression,

    #[error("Division by zero")]
    DivisionByZero,

    /// The result does not fit in a 64-bit signed integer.
    #[error("Integer overflow while applying '{operator}'")]
    Overflow { operator: Operator },

    /// The sequence is longer than the configured limit.
    #[error("Too many tokens: {actual} exceeds the limit of {limit}")]
    TooManyTokens { limit: usize, actual: usize },
}

impl DomainError {
    /// Creates a `ParseError` error.
    #[must_use]
    pub fn parse_error(token: impl Into<String>) -> Self {
        Self::ParseError {
            token: token.into(),
        }
    }
}
