//! HTTP host for the calculator router.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use rpn_calculator::Service;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing::field::Empty;

use crate::config::AppConfig;

/// Calculator routes wrapped in the serving middleware.
///
/// Layers run outermost first: trace, then timeout, then the calculator.
#[must_use]
pub fn build_router(config: &AppConfig) -> Router {
    let service = Arc::new(Service::new(config.calculator.clone()));
    let router = rpn_calculator::api::rest::router(service);

    let router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        config.server.request_timeout(),
    ));

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(|res: &Response<Body>, latency: Duration, span: &Span| {
                span.record("status", res.status().as_u16());
                span.record(
                    "latency_ms",
                    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                );
                tracing::debug!(parent: span, "request completed");
            }),
    )
}

/// Binds the listener and serves until `shutdown` resolves, then lets
/// in-flight requests finish.
///
/// # Errors
/// Returns an error if the address is invalid, the socket cannot be bound,
/// or the server fails while running.
pub async fn serve<F>(config: &AppConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.server.socket_addr()?;
    let router = build_router(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("HTTP server stopped");
    Ok(())
}
