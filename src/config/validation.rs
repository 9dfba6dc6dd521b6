//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("security.max_body_size must be greater than 0")]
    ZeroBodyLimit,

    #[error("routes[{index}].path must not be empty")]
    EmptyRoutePath { index: usize },

    #[error("routes[{index}].status {status} is not a valid HTTP status code")]
    InvalidStatus { index: usize, status: u16 },

    #[error("routes[{index}].content_type {value:?} is not a valid header value")]
    InvalidContentType { index: usize, value: String },

    #[error("routes[{index}].path {path:?} is already declared")]
    DuplicateRoute { index: usize, path: String },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.path.is_empty() {
            errors.push(ValidationError::EmptyRoutePath { index });
        } else if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicateRoute {
                index,
                path: route.path.clone(),
            });
        }

        if StatusCode::from_u16(route.status).is_err() {
            errors.push(ValidationError::InvalidStatus {
                index,
                status: route.status,
            });
        }

        if let Some(ct) = &route.content_type {
            if HeaderValue::from_str(ct).is_err() {
                errors.push(ValidationError::InvalidContentType {
                    index,
                    value: ct.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
