//! REST surface of the RPN calculator.

pub mod error;
pub mod handlers;
pub mod problem;
pub mod routes;

pub use problem::{APPLICATION_PROBLEM_JSON, Problem};
pub use routes::router;
