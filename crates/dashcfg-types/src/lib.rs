//! Shared types, adapter traits, and errors for dashcfg.
//!
//! Everything the configuration core, the storage adapters and the HTTP layer
//! pass between each other lives here, so adapter crates do not depend on the
//! core.

#![forbid(unsafe_code)]

pub mod config_adapter;
pub mod error;
pub mod layout;
pub mod prelude;
pub mod role;
pub mod types;

// vim: ts=4
