//! REST error mapping for the RPN calculator.

use axum::http::StatusCode;

use super::problem::Problem;
use crate::domain::error::DomainError;

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        let trace_id = tracing::Span::current()
            .id()
            .map(|id| id.into_u64().to_string());

        let (status, code, title) = match &e {
            DomainError::ParseError { .. } => {
                (StatusCode::BAD_REQUEST, "RPN_PARSE_ERROR", "Invalid token")
            }
            DomainError::Underflow { .. } => {
                (StatusCode::BAD_REQUEST, "RPN_STACK_UNDERFLOW", "Stack underflow")
            }
            DomainError::IncompleteExpression { .. } => (
                StatusCode::BAD_REQUEST,
                "RPN_INCOMPLETE_EXPRESSION",
                "Incomplete expression",
            ),
            DomainError::EmptyExpression => (
                StatusCode::BAD_REQUEST,
                "RPN_EMPTY_EXPRESSION",
                "Empty expression",
            ),
            DomainError::DivisionByZero => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RPN_DIVISION_BY_ZERO",
                "Division by zero",
            ),
            DomainError::Overflow { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RPN_OVERFLOW",
                "Integer overflow",
            ),
            DomainError::TooManyTokens { .. } => (
                StatusCode::URI_TOO_LONG,
                "RPN_TOO_MANY_TOKENS",
                "Too many tokens",
            ),
        };

        let mut problem = Problem::new(status, code, title, e.to_string());

        if let Some(id) = trace_id {
            problem = problem.with_trace_id(id);
        }

        problem
    }
}
