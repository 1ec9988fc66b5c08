//! REST handlers for the RPN calculator.

use std::sync::Arc;

use axum::extract::Extension;
use axum::http::{StatusCode, Uri, header};

use super::problem::Problem;
use crate::domain::service::Service;

pub type CalculatorResult<T> = Result<T, Problem>;

/// Splits a request path into percent-decoded tokens.
///
/// Empty segments are skipped, so the leading `/`, doubled and trailing
/// slashes produce no tokens. Segments that do not decode to UTF-8 are kept
/// as-is and later fail to parse.
#[must_use]
pub fn tokens_from_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            urlencoding::decode(segment)
                .map_or_else(|_| segment.to_owned(), std::borrow::Cow::into_owned)
        })
        .collect()
}

/// ANY /{tokens...}
///
/// Evaluates the path as an RPN expression.
pub async fn evaluate_path(
    Extension(service): Extension<Arc<Service>>,
    uri: Uri,
) -> CalculatorResult<(StatusCode, [(header::HeaderName, &'static str); 1], String)> {
    let path = uri.path();
    let tokens = tokens_from_path(path);

    let value = service
        .evaluate(&tokens)
        .map_err(|e| Problem::from(e).with_instance(path))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        format!("The answer is {value}"),
    ))
}
