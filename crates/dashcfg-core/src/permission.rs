//! Role permission evaluation and editing

use std::collections::BTreeMap;

use crate::prelude::*;
use crate::schema::FrozenSchema;
use dashcfg_types::role::Role;

/// Whether `role` is granted `action` on `resource`.
///
/// Falls back to the schema default when the role has no entry (or there is no
/// role). A pair the schema does not know evaluates to `false` and is logged as
/// schema drift.
pub fn grants(role: Option<&Role>, resource: &str, action: &str, schema: &FrozenSchema) -> bool {
	let Some(def) = schema.permission(resource, action) else {
		warn!(
			resource = resource,
			action = action,
			role = role.map(|r| r.id.as_str()),
			"schema drift: permission check for unknown resource/action"
		);
		return false;
	};

	role.and_then(|r| r.permissions.get(resource, action)).unwrap_or(def.default_enabled)
}

/// Flattened resource -> action -> granted map over the schema's pairs
pub fn effective_permissions(
	role: Option<&Role>,
	schema: &FrozenSchema,
) -> BTreeMap<ResourceId, BTreeMap<ActionId, bool>> {
	let mut res: BTreeMap<ResourceId, BTreeMap<ActionId, bool>> = BTreeMap::new();
	for def in schema.permission_items() {
		if let Some((resource, action)) = def.permission_key() {
			let granted =
				role.and_then(|r| r.permissions.get(resource, action)).unwrap_or(def.default_enabled);
			res.entry(resource.into()).or_default().insert(action.into(), granted);
		}
	}
	res
}

/// Role matrix entries the schema does not know about
pub fn unknown_grants(role: &Role, schema: &FrozenSchema) -> Vec<(ResourceId, ActionId)> {
	let mut res = Vec::new();
	for (resource, actions) in role.permissions.resources() {
		for action in actions.keys() {
			if schema.permission(resource.as_str(), action.as_str()).is_none() {
				res.push((resource.clone(), action.clone()));
			}
		}
	}
	res.sort();
	res
}

/// Returns a copy of `role` with one grant changed.
///
/// Only the touched resource's action map is rebuilt; the rest of the matrix is
/// shared with the original role.
pub fn set_grant(
	role: &Role,
	resource: &ResourceId,
	action: &ActionId,
	granted: bool,
	schema: &FrozenSchema,
) -> ClResult<Role> {
	if schema.permission(resource.as_str(), action.as_str()).is_none() {
		return Err(Error::ValidationError(format!("unknown permission '{}.{}'", resource, action)));
	}

	let mut res = role.clone();
	res.permissions = role.permissions.with_grant(resource, action, granted);
	Ok(res)
}


// vim: ts=4
