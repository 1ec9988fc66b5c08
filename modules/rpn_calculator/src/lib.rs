//! RPN Calculator Module
//!
//! Evaluates reverse-Polish-notation integer expressions taken from a request
//! path, e.g. `GET /3/4/+/2/*` answers `The answer is 14`.
//!
//! ## Architecture
//!
//! - `domain/token.rs` - Token and operator types
//! - `domain/evaluator.rs` - Stack machine
//! - `domain/service.rs` - Evaluation service with request limits
//! - `api/rest/` - Path adapter, routes and Problem mapping
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;

pub use domain::service::{Service, ServiceConfig};
