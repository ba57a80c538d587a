//! Effective configuration resolution
//!
//! Precedence is strict: personal override > role default > schema default >
//! `true`. A level is skipped only when it has no entry, so an explicit `false`
//! stops the fallthrough.

use std::collections::HashMap;

use crate::prelude::*;
use crate::schema::FrozenSchema;
use dashcfg_types::layout::Layout;
use dashcfg_types::role::{EffectiveConfig, Role, UserOverride};

/// Visibility of a single sidebar item
pub fn sidebar_visible(
	item: &str,
	user: Option<&UserOverride>,
	role: Option<&Role>,
	schema: &FrozenSchema,
) -> bool {
	user.and_then(|u| u.sidebar_overrides.get(item).copied())
		.or_else(|| role.and_then(|r| r.sidebar_defaults.as_ref()?.get(item).copied()))
		.or_else(|| schema.sidebar_item(item).map(|def| def.default_enabled))
		.unwrap_or(true)
}

/// Base layout: non-empty personal layout, else role layout, else system default.
///
/// A personal layout replaces the role layout wholesale; role widgets it omits
/// are not shown.
pub fn base_layout(user: Option<&UserOverride>, role: Option<&Role>, schema: &FrozenSchema) -> Layout {
	if let Some(layout) = user.and_then(|u| u.layout_override.as_ref()).filter(|l| !l.is_empty()) {
		return layout.clone();
	}
	if let Some(layout) = role.and_then(|r| r.layout_defaults.as_ref()) {
		return layout.clone();
	}
	schema.default_layout().clone()
}

/// Computes the effective configuration; pure, never fails
pub fn resolve(
	user: Option<&UserOverride>,
	role: Option<&Role>,
	schema: &FrozenSchema,
) -> EffectiveConfig {
	let sidebar_visibility: HashMap<ItemId, bool> = schema
		.sidebar_items()
		.map(|def| {
			(ItemId::new(def.id.clone()), sidebar_visible(&def.id, user, role, schema))
		})
		.collect();

	EffectiveConfig { sidebar_visibility, layout: base_layout(user, role, schema) }
}


// vim: ts=4
