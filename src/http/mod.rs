//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, body limit)
//!     → request.rs (buffered Request handed to the router)
//!     → routing::PathRouter (exact path lookup)
//!     → response.rs (handler output buffered, converted to a Response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{Request, UuidRequestId, X_REQUEST_ID};
pub use response::{not_found, ResponseBuffer, ResponseWriter};
pub use server::HttpServer;
