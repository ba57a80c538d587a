//! Configuration core for role and per-user dashboard settings.
//!
//! Computes which sidebar items a user sees, which dashboard widgets are placed
//! where, and which permissions a role holds. All computations are pure; the
//! `service` module adds storage access and caching around them.
//!
//! # Pipeline
//!
//! - **Schema** (`schema`): catalog of configurable items and their defaults
//! - **Permissions** (`permission`): per-role grants with schema fallback
//! - **Resolver** (`resolver`): personal > role > schema > `true` precedence
//! - **Toggle** (`toggle`): show/hide widgets on a base layout
//! - **Projector** (`projector`): base layout to five breakpoint layouts
//! - **Service** (`service`): the read/write interface used by collaborators

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod permission;
pub mod prelude;
pub mod projector;
pub mod resolver;
pub mod schema;
pub mod service;
pub mod toggle;
pub mod validate;

pub use schema::{default_schema, FrozenSchema, SchemaRegistry};
pub use service::ConfigService;

pub fn register_schema(registry: &mut schema::SchemaRegistry) -> dashcfg_types::error::ClResult<()> {
	schema::register_schema(registry)
}

// vim: ts=4
