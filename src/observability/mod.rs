//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! router, server, lifecycle
//!     → tracing events with structured fields
//!     → logging.rs subscriber (fmt layer, EnvFilter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Request ID is attached by the HTTP layer and logged with each dispatch
//! - `RUST_LOG` always wins over the configured level

pub mod logging;
