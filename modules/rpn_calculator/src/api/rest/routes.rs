//! Route table for the RPN calculator.

use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::routing::any;

use super::handlers;
use crate::domain::service::Service;

/// Builds the calculator router.
///
/// Every path is an expression, so both `/` and the catch-all accept any
/// method.
#[must_use]
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/", any(handlers::evaluate_path))
        .route("/{*tokens}", any(handlers::evaluate_path))
        .layer(Extension(service))
}
