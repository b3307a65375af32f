//! Peer transfer server routes.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, Request};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::propagate_header::PropagateHeaderLayer;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{Level, Span};

use super::handlers::{chunk, metadata, speedtest};
use super::PEER_SERVER_LOG_TARGET;
use crate::registry::ContentRegistry;

/// It adds the routes to the router.
///
/// Every request is aborted with `408 Request Timeout` after `timeout`.
#[allow(clippy::needless_pass_by_value)]
pub fn router(registry: Arc<ContentRegistry>, timeout: Duration, &addr: &SocketAddr) -> Router {
    Router::new()
        .route("/metadata/:hash", get(metadata))
        .route("/chunk/:hash/:index", get(chunk))
        .route("/speedtest", get(speedtest))
        .with_state(registry)
        .layer(TimeoutLayer::new(timeout))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateHeaderLayer::new(HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(move |request: &Request<axum::body::Body>, _span: &Span| {
                    let method = request.method().to_string();
                    let uri = request.uri().to_string();
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();

                    tracing::debug!(
                        target: PEER_SERVER_LOG_TARGET,
                        server_socket_addr = %addr, method = %method, uri = %uri, request_id = %request_id, "request");
                })
                .on_response(move |response: &Response, latency: Duration, _span: &Span| {
                    let status_code = response.status();
                    let request_id = response
                        .headers()
                        .get("x-request-id")
                        .map(|v| v.to_str().unwrap_or_default())
                        .unwrap_or_default();
                    let latency_ms = latency.as_millis();

                    tracing::debug!(
                        target: PEER_SERVER_LOG_TARGET,
                        server_socket_addr = %addr, latency = %latency_ms, status = %status_code, request_id = %request_id, "response");
                }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
