//! Tokens consumed by the evaluator.

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// Arithmetic operators understood by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Multiply,
    Divide,
}

impl Operator {
    /// Every supported operator, in symbol-table order.
    pub const ALL: [Self; 3] = [Self::Add, Self::Multiply, Self::Divide];

    /// The path symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Looks up an operator by its exact symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Applies the operator to `lhs` and `rhs`.
    ///
    /// Division rounds toward negative infinity, so `-7 / 2` is `-4`.
    ///
    /// # Errors
    /// Returns [`DomainError::DivisionByZero`] when dividing by zero and
    /// [`DomainError::Overflow`] when the result does not fit in `i64`.
    pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, DomainError> {
        let value = match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Multiply => lhs.checked_mul(rhs),
            Self::Divide => {
                if rhs == 0 {
                    return Err(DomainError::DivisionByZero);
                }
                floor_div(lhs, rhs)
            }
        };
        value.ok_or(DomainError::Overflow { operator: self })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `None` only for `i64::MIN / -1`; callers reject a zero divisor first.
fn floor_div(lhs: i64, rhs: i64) -> Option<i64> {
    let quotient = lhs.checked_div(rhs)?;
    let remainder = lhs.checked_rem(rhs)?;
    if remainder != 0 && ((remainder < 0) != (rhs < 0)) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// A single unit of input: an integer literal or an operator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Integer(i64),
    Operator(Operator),
}

impl FromStr for Token {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(op) = Operator::from_symbol(s) {
            return Ok(Self::Operator(op));
        }
        s.parse::<i64>()
            .map(Self::Integer)
            .map_err(|_| DomainError::parse_error(s))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}
