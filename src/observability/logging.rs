//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Derive the filter from `RUST_LOG` or the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Filter directive for a configured log level.
///
/// A bare level applies to this crate and `tower_http`; anything else is
/// taken as a complete `EnvFilter` directive.
pub fn default_directive(log_level: &str) -> String {
    let level = log_level.trim().to_ascii_lowercase();
    if LEVELS.contains(&level.as_str()) {
        format!("path_mux={level},tower_http={level}")
    } else {
        log_level.to_string()
    }
}

/// Install the global subscriber.
pub fn init_logging(log_level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level() {
        assert_eq!(default_directive("debug"), "path_mux=debug,tower_http=debug");
        assert_eq!(default_directive(" WARN "), "path_mux=warn,tower_http=warn");
    }

    #[test]
    fn test_full_directive_passes_through() {
        assert_eq!(default_directive("path_mux=trace,hyper=info"), "path_mux=trace,hyper=info");
    }
}
