//! Response writing.
//!
//! # Responsibilities
//! - Define the output capability handed to handlers (`ResponseWriter`)
//! - Buffer a handler's output and convert it into an axum `Response`
//! - Produce the standard "not found" response
//!
//! # Design Decisions
//! - The first status written wins; later `write_header` calls are ignored
//! - Writing body bytes without a status implies `200 OK`
//! - Bodies are buffered, not streamed (handlers are synchronous)

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

/// Body written by [`not_found`].
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Output capability used by a handler to set status, headers and body.
pub trait ResponseWriter {
    /// Mutable access to the response headers.
    ///
    /// Changes made after the status has been written have no effect on the
    /// status line but are still carried in the final response.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Set the response status. Only the first call takes effect.
    fn write_header(&mut self, status: StatusCode);

    /// Append bytes to the response body.
    fn write(&mut self, data: &[u8]);

    /// Append a UTF-8 string to the response body.
    fn write_str(&mut self, s: &str) {
        self.write(s.as_bytes());
    }
}

/// An in-memory [`ResponseWriter`].
#[derive(Debug, Default)]
pub struct ResponseBuffer {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status that will be sent (200 if none was written).
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convert the buffered output into an axum response.
    pub fn into_response(self) -> Response {
        let status = self.status();
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseWriter for ResponseBuffer {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_header(&mut self, status: StatusCode) {
        match self.status {
            Some(current) => {
                tracing::debug!(
                    current = %current,
                    ignored = %status,
                    "Superfluous write_header call"
                );
            }
            None => self.status = Some(status),
        }
    }

    fn write(&mut self, data: &[u8]) {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(data);
    }
}

impl std::io::Write for ResponseBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        ResponseWriter::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Write a plain-text error response with the given status.
pub fn error(w: &mut dyn ResponseWriter, message: &str, status: StatusCode) {
    let headers = w.headers_mut();
    headers.remove(header::CONTENT_LENGTH);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    w.write_header(status);
    w.write_str(message);
    w.write_str("\n");
}

/// Write the standard "404 page not found" response.
pub fn not_found(w: &mut dyn ResponseWriter) {
    error(w, NOT_FOUND_BODY.trim_end(), StatusCode::NOT_FOUND);
}
