//! path-mux server.
//!
//! Serves the fixed-response routes declared in the configuration file
//! through a [`PathRouter`]; every other path answers 404.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use path_mux::config::{load_config, validate, ConfigError, ServerConfig};
use path_mux::lifecycle::{signals, Shutdown};
use path_mux::observability::logging;
use path_mux::routing::{PathRouter, StaticHandler};
use path_mux::HttpServer;

#[derive(Parser)]
#[command(name = "path-mux")]
#[command(about = "Exact-match HTTP path router", long_about = None, version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    config.apply_overrides(cli.bind.as_deref(), cli.log_level.as_deref());
    validate(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!("path-mux v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        lock_scope = ?config.router.lock_scope,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let router = Arc::new(PathRouter::with_lock_scope(config.router.lock_scope));
    for route in &config.routes {
        router.register_handler(StaticHandler::from_config(route), route.path.clone())?;
    }
    tracing::info!(routes = router.len(), "Routes registered");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    let server = HttpServer::new(config, router);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
