//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum app that forwards every request to a `PathRouter`
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind server to listener and shut down gracefully
//!
//! # Design Decisions
//! - A single fallback handler: the `PathRouter` alone decides what a path
//!   means, for every method
//! - Handlers are synchronous and may block on the router lock, so dispatch
//!   runs on the blocking thread pool

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{request_id, Request, UuidRequestId};
use crate::routing::PathRouter;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<PathRouter>,
}

/// HTTP front end for a [`PathRouter`].
pub struct HttpServer {
    app: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `router`.
    pub fn new(config: ServerConfig, router: Arc<PathRouter>) -> Self {
        let state = AppState { router };
        Self {
            app: Self::build_app(&config, state),
        }
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The Axum app, for embedding or in-process testing.
    pub fn into_router(self) -> Router {
        self.app
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Buffer the request and hand it to the path router.
async fn dispatch_handler(State(state): State<AppState>, parts: Parts, body: Bytes) -> Response {
    let request = Request::from_parts(parts, body);

    tracing::debug!(
        request_id = request_id(&request).unwrap_or("unknown"),
        method = %request.method(),
        path = %request.uri().path(),
        "Dispatching request"
    );

    let router = state.router.clone();
    match tokio::task::spawn_blocking(move || router.respond(&request)).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Handler task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
