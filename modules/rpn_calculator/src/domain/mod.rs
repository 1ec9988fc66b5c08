//! Domain layer for the RPN calculator
//!
//! Contains the token model, the stack evaluator and the service wrapping it.

pub mod error;
pub mod evaluator;
pub mod service;
pub mod token;

pub use error::DomainError;
pub use evaluator::{Evaluator, evaluate};
pub use service::{Service, ServiceConfig};
pub use token::{Operator, Token};
