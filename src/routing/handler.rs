//! Request handlers.
//!
//! # Responsibilities
//! - Define the single-method `Handler` capability
//! - Adapt plain functions and closures into handlers
//! - Serve fixed responses declared in configuration
//!
//! # Design Decisions
//! - Handlers are synchronous and write into a `ResponseWriter`
//! - `Send + Sync` so one handler can serve concurrent requests

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};

use crate::config::RouteConfig;
use crate::http::request::Request;
use crate::http::response::ResponseWriter;

/// Something that can process a request and write a response.
pub trait Handler: Send + Sync {
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request);
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        (**self).serve(w, req)
    }
}

/// Adapter turning a function into a [`Handler`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F>(F);

impl<F> HandlerFn<F>
where
    F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync,
{
    fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        (self.0)(w, req)
    }
}

impl<F> std::fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

/// Wrap a function as a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync,
{
    HandlerFn::new(f)
}

/// Serves the same response for every request.
#[derive(Debug, Clone)]
pub struct StaticHandler {
    status: StatusCode,
    content_type: Option<HeaderValue>,
    body: String,
}

impl StaticHandler {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: HeaderValue) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Build from a route entry.
    ///
    /// Validation rejects bad entries first. When called on an unvalidated
    /// entry, an invalid status falls back to 200 and an invalid content type
    /// is dropped, each with a warning.
    pub fn from_config(route: &RouteConfig) -> Self {
        let status = StatusCode::from_u16(route.status).unwrap_or_else(|_| {
            tracing::warn!(
                path = %route.path,
                status = route.status,
                "Invalid status code, serving 200"
            );
            StatusCode::OK
        });
        let content_type = route.content_type.as_deref().and_then(|ct| {
            HeaderValue::from_str(ct)
                .map_err(|_| {
                    tracing::warn!(
                        path = %route.path,
                        content_type = ct,
                        "Invalid content type, header dropped"
                    );
                })
                .ok()
        });

        Self {
            status,
            content_type,
            body: route.body.clone(),
        }
    }
}

impl Handler for StaticHandler {
    fn serve(&self, w: &mut dyn ResponseWriter, _req: &Request) {
        if let Some(ct) = &self.content_type {
            w.headers_mut().insert(header::CONTENT_TYPE, ct.clone());
        }
        w.write_header(self.status);
        w.write_str(&self.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::ResponseBuffer;
    use axum::body::Bytes;

    fn request(path: &str) -> Request {
        axum::http::Request::builder()
            .uri(path)
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_handler_fn_receives_request() {
        let handler = handler_fn(|w, req| {
            w.write_str(req.uri().path());
        });

        let mut buf = ResponseBuffer::new();
        handler.serve(&mut buf, &request("/echo"));
        assert_eq!(buf.body(), b"/echo");
    }

    #[test]
    fn test_shared_handler() {
        let handler: Arc<dyn Handler> = Arc::new(StaticHandler::new(StatusCode::OK, "shared"));

        let mut buf = ResponseBuffer::new();
        handler.serve(&mut buf, &request("/"));
        assert_eq!(buf.body(), b"shared");
    }

    #[test]
    fn test_static_handler_from_config() {
        let route = RouteConfig {
            path: "/teapot".into(),
            status: 418,
            content_type: Some("text/plain".into()),
            body: "short and stout".into(),
        };
        let handler = StaticHandler::from_config(&route);

        let mut buf = ResponseBuffer::new();
        handler.serve(&mut buf, &request("/teapot"));
        assert_eq!(buf.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(buf.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(buf.body(), b"short and stout");
    }

    #[test]
    fn test_static_handler_from_unvalidated_config() {
        let route = RouteConfig {
            path: "/broken".into(),
            status: 1000,
            content_type: Some("text/plain\n".into()),
            body: "still served".into(),
        };
        let handler = StaticHandler::from_config(&route);

        let mut buf = ResponseBuffer::new();
        handler.serve(&mut buf, &request("/broken"));
        assert_eq!(buf.status(), StatusCode::OK);
        assert!(buf.headers().get(header::CONTENT_TYPE).is_none());
        assert_eq!(buf.body(), b"still served");
    }
}
