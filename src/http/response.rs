//! Response construction for the gateway's handling branches.
//!
//! # Responsibilities
//! - Build the preflight, relay, bad-gateway and fallback responses
//! - Inject `Access-Control-Allow-Origin: *` on every branch
//!
//! # Design Decisions
//! - One constructor per branch; each sets the CORS header itself, so no
//!   code path can produce a response without it
//! - Backend bodies are relayed as opaque bytes with a JSON content type;
//!   the gateway is a transparent relay, not a validating one

use axum::body::{Body, Bytes};
use axum::http::{header, Response, StatusCode};
use serde::Serialize;

/// Service note returned for any request outside the public namespace.
pub const FALLBACK_MESSAGE: &str = "Bhaktamar Voice Bot API — use /api/* endpoints";

/// Error label used in the 502 body when the backend cannot be reached.
pub const BACKEND_UNREACHABLE: &str = "Backend unreachable";

const ALLOWED_METHODS: &str = "GET, POST, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: &'a str,
}

/// Empty 200 answering a CORS preflight.
pub fn preflight() -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS)
        .body(Body::empty())
        .unwrap()
}

/// Relay a backend response: original status, body passed through untouched.
pub fn relay(status: StatusCode, body: Bytes) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::from(body))
        .unwrap()
}

/// 502 for a network-level failure reaching the backend.
pub fn bad_gateway(detail: &str) -> Response<Body> {
    let body = serde_json::to_string(&ErrorBody {
        error: BACKEND_UNREACHABLE,
        detail,
    })
    .unwrap();
    Response::builder()
        .status(StatusCode::BAD_GATEWAY)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::from(body))
        .unwrap()
}

/// Fixed plain-text note for paths outside the public prefix.
pub fn fallback() -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::from(FALLBACK_MESSAGE))
        .unwrap()
}

/// Locally-produced error that is not a backend failure (e.g. an inbound
/// body that could not be read). Still carries the CORS header.
pub fn error_text(status: StatusCode, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::from(message.to_string()))
        .unwrap()
}
