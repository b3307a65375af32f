//! Error responses of the peer transfer server. They are plain text.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[must_use]
pub fn bad_request(reason: &str) -> Response {
    (StatusCode::BAD_REQUEST, reason.to_string()).into_response()
}

#[must_use]
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "file not found").into_response()
}

#[must_use]
pub fn internal_server_error(reason: &str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, reason.to_string()).into_response()
}
