//! Request representation and request IDs.
//!
//! # Responsibilities
//! - Define the request type handed to handlers
//! - Generate a unique request ID (UUID v4) for every inbound request
//!
//! # Design Decisions
//! - Handlers are synchronous, so the body is buffered before dispatch
//! - Request ID added as early as possible for tracing
//! - An ID supplied by the client is kept as-is

use axum::body::Bytes;
use axum::http::HeaderValue;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Request header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// An inbound request with a fully buffered body.
pub type Request = axum::http::Request<Bytes>;

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Read the request ID header, if present.
pub fn request_id<B>(request: &axum::http::Request<B>) -> Option<&str> {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
}
