//! Domain service for the RPN calculator
//!
//! Applies request limits and logs each evaluation before handing the tokens
//! to a fresh [`Evaluator`](super::evaluator::Evaluator).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::DomainError;
use super::evaluator;

/// Limits applied by [`Service`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServiceConfig {
    /// Longest token sequence accepted in one evaluation.
    pub max_tokens: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { max_tokens: 1024 }
    }
}

/// Stateless evaluation service shared by all requests.
#[derive(Debug, Clone, Default)]
pub struct Service {
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Evaluate `tokens` as one RPN expression.
    ///
    /// # Errors
    /// [`DomainError::TooManyTokens`] when the sequence exceeds
    /// `max_tokens`, otherwise any error from [`evaluator::evaluate`].
    pub fn evaluate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<i64, DomainError> {
        if tokens.len() > self.config.max_tokens {
            return Err(DomainError::TooManyTokens {
                limit: self.config.max_tokens,
                actual: tokens.len(),
            });
        }

        debug!(tokens = tokens.len(), "evaluating expression");
        let result = evaluator::evaluate(tokens);
        match &result {
            Ok(value) => debug!(value, "expression evaluated"),
            Err(e) => debug!(error = %e, "expression rejected"),
        }
        result
    }
}
