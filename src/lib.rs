//! Exact-match HTTP path router.
//!
//! A [`PathRouter`] maps request paths to [`Handler`]s under a single lock and
//! answers unknown paths with a 404. [`HttpServer`] mounts a router behind an
//! Axum/Tokio server.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::{HttpServer, Request, ResponseBuffer, ResponseWriter};
pub use lifecycle::Shutdown;
pub use routing::{handler_fn, Handler, LockScope, PathRouter, RouterError};
