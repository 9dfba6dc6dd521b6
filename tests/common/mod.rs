//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use path_mux::http::ResponseBuffer;
use path_mux::{HttpServer, PathRouter, Request, ServerConfig, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Build a GET request for `path`.
pub fn request(path: &str) -> Request {
    axum::http::Request::builder()
        .uri(path)
        .body(Bytes::new())
        .unwrap()
}

/// Dispatch a GET for `path` and return status and body text.
pub fn dispatch(router: &PathRouter, path: &str) -> (StatusCode, String) {
    let mut buf = ResponseBuffer::new();
    router.dispatch(&mut buf, &request(path));
    (buf.status(), String::from_utf8(buf.body().to_vec()).unwrap())
}

/// A server running on an ephemeral local port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start an `HttpServer` for `router` on 127.0.0.1 with a random port.
#[allow(dead_code)]
pub async fn start_server(mut config: ServerConfig, router: Arc<PathRouter>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, router);
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    // Listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
