//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (ServerConfig::apply_overrides)
//!     → validation.rs (semantic checks, run once on the merged config)
//!     → ServerConfig (validated, immutable)
//!     → routes registered on the PathRouter at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, validate, ConfigError};
pub use schema::ListenerConfig;
pub use schema::RouteConfig;
pub use schema::ServerConfig;
