//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::LockScope;

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Router behaviour.
    pub router: RouterConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Fixed-response routes registered at startup.
    pub routes: Vec<RouteConfig>,
}

impl ServerConfig {
    /// Replace file values with ones given on the command line.
    pub fn apply_overrides(&mut self, bind_address: Option<&str>, log_level: Option<&str>) {
        if let Some(bind) = bind_address {
            self.listener.bind_address = bind.to_string();
        }
        if let Some(level) = log_level {
            self.observability.log_level = level.to_string();
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Whether the router lock also covers handler execution.
    pub lock_scope: LockScope,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// A path that always answers with the same response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Exact request path.
    pub path: String,

    /// Response status code (default: 200).
    #[serde(default = "default_status")]
    pub status: u16,

    /// Optional Content-Type header.
    #[serde(default)]
    pub content_type: Option<String>,

    /// Response body.
    #[serde(default)]
    pub body: String,
}

fn default_status() -> u16 {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.router.lock_scope, LockScope::Dispatch);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.security.max_body_size, 2 * 1024 * 1024);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            [router]
            lock_scope = "lookup"

            [[routes]]
            path = "/health"
            body = "ok"

            [[routes]]
            path = "/gone"
            status = 410
            content_type = "text/plain"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.router.lock_scope, LockScope::Lookup);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].status, 200);
        assert_eq!(config.routes[0].body, "ok");
        assert_eq!(config.routes[1].status, 410);
        assert_eq!(config.routes[1].content_type.as_deref(), Some("text/plain"));
        assert!(config.routes[1].body.is_empty());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config: ServerConfig = toml::from_str(
            "[listener]\nbind_address = \"not-an-address\"\n[observability]\nlog_level = \"warn\"\n",
        )
        .unwrap();
        assert!(crate::config::validate(&config).is_err());

        config.apply_overrides(Some("127.0.0.1:8080"), None);
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.observability.log_level, "warn");
        assert!(crate::config::validate(&config).is_ok());

        config.apply_overrides(None, Some("debug"));
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_unknown_lock_scope_rejected() {
        let result: Result<ServerConfig, _> = toml::from_str("[router]\nlock_scope = \"none\"\n");
        assert!(result.is_err());
    }
}
