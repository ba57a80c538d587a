//! Schema provider: the catalog of configurable items
//!
//! - **Types** (`types.rs`): item definitions, registry, frozen schema
//! - **Catalog** (`catalog.rs`): built-in sidebar items, widgets, permissions
//!   and the system default layout

pub mod catalog;
pub mod types;

pub use catalog::{register_schema, system_default_layout};
pub use types::{
	FrozenSchema, ItemCategory, ItemDefinition, ItemDefinitionBuilder, PermissionEntry,
	PermissionSchema, SchemaRegistry, SchemaView, WidgetKind,
};

use crate::prelude::*;

/// Frozen schema holding only the built-in catalog
pub fn default_schema() -> ClResult<FrozenSchema> {
	let mut registry = SchemaRegistry::new();
	register_schema(&mut registry)?;
	registry.freeze()
}

// vim: ts=4
