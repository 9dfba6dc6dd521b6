//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (exact path lookup under lock)
//!     → handler.rs (matched Handler writes the response)
//!     → or: standard 404 response
//!
//! Registration (startup or runtime):
//!     Handler + path
//!     → router.rs (reject duplicates, insert)
//! ```
//!
//! # Design Decisions
//! - Exact string match only: no prefixes, patterns or methods
//! - Registration is allowed at any time, not only at startup
//! - Deterministic: same path always reaches the same handler

pub mod handler;
pub mod router;

pub use handler::{handler_fn, Handler, HandlerFn, StaticHandler};
pub use router::{LockScope, PathRouter, RouterError};
