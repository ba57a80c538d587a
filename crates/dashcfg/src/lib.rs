//! HTTP service for role and per-user dashboard configuration.
//!
//! Wires the configuration core to a storage adapter and exposes it as an axum
//! router. Authentication is out of scope: the caller's identity and roles
//! arrive in request headers set by an upstream auth layer.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod handler;
pub mod prelude;
pub mod routes;

pub use app::{App, AppBuilder, AppState};

// vim: ts=4
