//! Stack machine for RPN expressions.

use super::error::DomainError;
use super::token::Token;

/// Evaluates an RPN expression given as raw token strings.
///
/// # Errors
/// Returns the first [`DomainError`] encountered; see [`Evaluator::push`]
/// and [`Evaluator::finish`].
pub fn evaluate<I, S>(tokens: I) -> Result<i64, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut evaluator = Evaluator::new();
    for raw in tokens {
        evaluator.push(raw.as_ref().parse()?)?;
    }
    evaluator.finish()
}

/// Owns the value stack of a single evaluation.
#[derive(Debug, Default)]
pub struct Evaluator {
    stack: Vec<i64>,
}

impl Evaluator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one token into the machine.
    ///
    /// Integers are pushed. An operator replaces the top two values with its
    /// result; the topmost value is the right-hand operand.
    ///
    /// A rejected token leaves the stack unchanged.
    ///
    /// # Errors
    /// [`DomainError::Underflow`] when fewer than two values are available,
    /// or the arithmetic error from [`Operator::apply`](super::token::Operator::apply).
    pub fn push(&mut self, token: Token) -> Result<(), DomainError> {
        match token {
            Token::Integer(value) => self.stack.push(value),
            Token::Operator(operator) => {
                let [.., lhs, rhs] = self.stack[..] else {
                    return Err(DomainError::Underflow {
                        operator,
                        available: self.stack.len(),
                    });
                };
                let value = operator.apply(lhs, rhs)?;
                self.stack.truncate(self.stack.len() - 2);
                self.stack.push(value);
            }
        }
        Ok(())
    }

    /// Number of values currently on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consumes the evaluator and returns the single remaining value.
    ///
    /// # Errors
    /// [`DomainError::EmptyExpression`] for an empty stack and
    /// [`DomainError::IncompleteExpression`] when more than one value is left.
    pub fn finish(self) -> Result<i64, DomainError> {
        match self.stack.as_slice() {
            [] => Err(DomainError::EmptyExpression),
            [value] => Ok(*value),
            rest => Err(DomainError::IncompleteExpression {
                remaining: rest.len(),
            }),
        }
    }
}
