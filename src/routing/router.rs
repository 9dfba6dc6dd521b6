//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store handlers keyed by exact request path
//! - Reject a second registration for the same path
//! - Dispatch requests to the matching handler, or answer 404
//!
//! # Design Decisions
//! - One `Mutex` guards the map; there is no read/write split
//! - The request path is percent-decoded before lookup (`/a%20b` matches
//!   `/a b`); otherwise paths are compared verbatim (no normalization, no
//!   trailing-slash logic, `+` stays `+`)
//! - By default the lock is held while the handler runs, which serializes
//!   all dispatches and registrations on a router. `LockScope::Lookup`
//!   narrows the lock to the map lookup.
//! - Handlers must not call back into a router using `LockScope::Dispatch`;
//!   the mutex is not reentrant and the call would deadlock.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::response::Response;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::request::Request;
use crate::http::response::{not_found, ResponseBuffer, ResponseWriter};
use crate::routing::handler::{Handler, HandlerFn};

/// Error returned by [`PathRouter::register_handler`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("path already exists: {path}")]
    DuplicatePath { path: String },
}

/// How much of a dispatch runs while the router lock is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LockScope {
    /// Lookup and handler invocation both run under the lock.
    #[default]
    Dispatch,
    /// Only the lookup runs under the lock; the handler runs after release.
    Lookup,
}

type HandlerMap = HashMap<String, Arc<dyn Handler>>;

/// Exact-match path router.
///
/// Build one with [`PathRouter::default`] and share it (`&PathRouter` or
/// `Arc<PathRouter>`) between all threads that register or dispatch.
#[derive(Default)]
pub struct PathRouter {
    handlers: Mutex<HandlerMap>,
    lock_scope: LockScope,
}

impl PathRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lock_scope(lock_scope: LockScope) -> Self {
        Self {
            handlers: Mutex::default(),
            lock_scope,
        }
    }

    pub fn lock_scope(&self) -> LockScope {
        self.lock_scope
    }

    /// Register `handler` for requests whose path equals `path`.
    ///
    /// Fails with [`RouterError::DuplicatePath`] if `path` already has a
    /// handler; the existing registration is left untouched.
    pub fn register_handler<H>(&self, handler: H, path: impl Into<String>) -> Result<(), RouterError>
    where
        H: Handler + 'static,
    {
        let path = path.into();
        let mut handlers = self.lock();

        match handlers.entry(path) {
            Entry::Occupied(entry) => {
                tracing::warn!(path = %entry.key(), "Path already registered");
                Err(RouterError::DuplicatePath {
                    path: entry.key().clone(),
                })
            }
            Entry::Vacant(entry) => {
                tracing::debug!(path = %entry.key(), "Handler registered");
                entry.insert(Arc::new(handler));
                Ok(())
            }
        }
    }

    /// Register a function for requests whose path equals `path`.
    ///
    /// A duplicate path is not reported; the earlier registration stays.
    pub fn register_handler_func<F>(&self, f: F, path: impl Into<String>)
    where
        F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
    {
        let _ = self.register_handler(HandlerFn::new(f), path);
    }

    /// Hand `req` to the handler registered for its path, or write a 404.
    pub fn dispatch(&self, w: &mut dyn ResponseWriter, req: &Request) {
        let path = percent_decode_str(req.uri().path()).decode_utf8_lossy();

        match self.lock_scope {
            LockScope::Dispatch => {
                let handlers = self.lock();
                match handlers.get(path.as_ref()) {
                    Some(handler) => handler.serve(w, req),
                    None => Self::no_match(w, &path),
                }
            }
            LockScope::Lookup => {
                let handler = self.lock().get(path.as_ref()).cloned();
                match handler {
                    Some(handler) => handler.serve(w, req),
                    None => Self::no_match(w, &path),
                }
            }
        }
    }

    /// Dispatch into a fresh buffer and return the finished response.
    pub fn respond(&self, req: &Request) -> Response {
        let mut buf = ResponseBuffer::new();
        self.dispatch(&mut buf, req);
        buf.into_response()
    }

    /// Number of registered paths.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn no_match(w: &mut dyn ResponseWriter, path: &str) {
        tracing::debug!(path = %path, "No handler registered for path");
        not_found(w);
    }

    // A handler panicking under the lock poisons it. The map is only ever
    // changed by a single insert, so it is still consistent.
    fn lock(&self) -> MutexGuard<'_, HandlerMap> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PathRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathRouter")
            .field("lock_scope", &self.lock_scope)
            .finish_non_exhaustive()
    }
}
