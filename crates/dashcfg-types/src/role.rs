//! Role, personal override and effective configuration records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::layout::Layout;
use crate::types::{ActionId, ItemId, ResourceId, RoleId, Timestamp, UserId};

pub type ActionGrants = HashMap<ActionId, bool>;

/// resource -> action -> granted
///
/// Each resource's action map sits behind its own `Arc`. `with_grant` rebuilds
/// only the touched resource map and shares every other one, so a reader holding
/// a clone of the old matrix keeps seeing the complete old state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMatrix(Arc<HashMap<ResourceId, Arc<ActionGrants>>>);

impl PermissionMatrix {
	pub fn new() -> Self {
		Self::default()
	}

	/// Explicit grant for `(resource, action)`, if the role sets one
	pub fn get(&self, resource: &str, action: &str) -> Option<bool> {
		self.0.get(resource).and_then(|actions| actions.get(action)).copied()
	}

	pub fn resource(&self, resource: &str) -> Option<&Arc<ActionGrants>> {
		self.0.get(resource)
	}

	pub fn resources(&self) -> impl Iterator<Item = (&ResourceId, &Arc<ActionGrants>)> {
		self.0.iter()
	}

	/// Path copy: returns a new matrix with one grant changed
	pub fn with_grant(&self, resource: &ResourceId, action: &ActionId, granted: bool) -> Self {
		let mut actions: ActionGrants =
			self.0.get(resource).map(|a| (**a).clone()).unwrap_or_default();
		actions.insert(action.clone(), granted);

		let mut resources: HashMap<ResourceId, Arc<ActionGrants>> = (*self.0).clone();
		resources.insert(resource.clone(), Arc::new(actions));
		Self(Arc::new(resources))
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<(ResourceId, ActionGrants)> for PermissionMatrix {
	fn from_iter<I: IntoIterator<Item = (ResourceId, ActionGrants)>>(iter: I) -> Self {
		Self(Arc::new(iter.into_iter().map(|(res, actions)| (res, Arc::new(actions))).collect()))
	}
}

/// Organization role with its defaults
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
	pub id: RoleId,
	pub name: Box<str>,
	/// Bumped by storage on every write
	#[serde(default)]
	pub version: u64,
	#[serde(default)]
	pub permissions: PermissionMatrix,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sidebar_defaults: Option<HashMap<ItemId, bool>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub layout_defaults: Option<Layout>,
	#[serde(default)]
	pub updated_at: Timestamp,
}

impl Role {
	/// Brand-new role: no defaults of its own, everything falls through
	pub fn new(id: impl Into<RoleId>, name: impl Into<Box<str>>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			version: 0,
			permissions: PermissionMatrix::new(),
			sidebar_defaults: None,
			layout_defaults: None,
			updated_at: Timestamp::default(),
		}
	}
}

/// Personal configuration of a single user
///
/// `role_id` is only a lookup key. Deleting the role leaves this record intact;
/// resolution then falls through to the schema defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOverride {
	pub user_id: UserId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role_id: Option<RoleId>,
	#[serde(default)]
	pub sidebar_overrides: HashMap<ItemId, bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub layout_override: Option<Layout>,
	#[serde(default)]
	pub updated_at: Timestamp,
}

impl UserOverride {
	pub fn new(user_id: impl Into<UserId>, role_id: Option<RoleId>) -> Self {
		Self {
			user_id: user_id.into(),
			role_id,
			sidebar_overrides: HashMap::new(),
			layout_override: None,
			updated_at: Timestamp::default(),
		}
	}
}

/// Derived configuration a user actually sees; never stored
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
	pub sidebar_visibility: HashMap<ItemId, bool>,
	pub layout: Layout,
}

/// Role defaults as exposed to collaborators; absent means "fall through"
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefaults {
	pub sidebar_defaults: Option<HashMap<ItemId, bool>>,
	pub layout_defaults: Option<Layout>,
	pub version: u64,
}

impl From<&Role> for RoleDefaults {
	fn from(role: &Role) -> Self {
		Self {
			sidebar_defaults: role.sidebar_defaults.clone(),
			layout_defaults: role.layout_defaults.clone(),
			version: role.version,
		}
	}
}

/// Partial update of a user's personal configuration; absent fields are kept
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalConfigPatch {
	pub sidebar_overrides: Option<HashMap<ItemId, bool>>,
	pub layout_override: Option<Layout>,
}

/// Partial update of a role's defaults; absent fields are kept
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefaultsPatch {
	pub sidebar_defaults: Option<HashMap<ItemId, bool>>,
	pub layout_defaults: Option<Layout>,
	/// Optional concurrency token; without it the write is last-write-wins
	pub expected_version: Option<u64>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn matrix() -> PermissionMatrix {
		PermissionMatrix::from_iter([
			(
				ResourceId::from("leads"),
				HashMap::from([(ActionId::from("view"), true), (ActionId::from("export"), false)]),
			),
			(ResourceId::from("billing"), HashMap::from([(ActionId::from("view"), false)])),
		])
	}

	#[test]
	fn test_with_grant_changes_only_target() {
		let old = matrix();
		let new = old.with_grant(&"leads".into(), &"export".into(), true);

		assert_eq!(old.get("leads", "export"), Some(false));
		assert_eq!(new.get("leads", "export"), Some(true));
		assert_eq!(new.get("leads", "view"), Some(true));
		assert_eq!(new.get("billing", "view"), Some(false));
	}

	#[test]
	fn test_with_grant_shares_untouched_resources() {
		let old = matrix();
		let new = old.with_grant(&"leads".into(), &"export".into(), true);

		let (Some(old_billing), Some(new_billing)) = (old.resource("billing"), new.resource("billing"))
		else {
			panic!("billing missing");
		};
		assert!(Arc::ptr_eq(old_billing, new_billing));

		let (Some(old_leads), Some(new_leads)) = (old.resource("leads"), new.resource("leads")) else {
			panic!("leads missing");
		};
		assert!(!Arc::ptr_eq(old_leads, new_leads));
	}

	#[test]
	fn test_with_grant_new_resource() {
		let new = PermissionMatrix::new().with_grant(&"team".into(), &"invite".into(), true);
		assert_eq!(new.get("team", "invite"), Some(true));
		assert_eq!(new.get("team", "remove"), None);
	}

	#[test]
	fn test_role_round_trips_absent_defaults() {
		let role = Role::new("sales", "Sales");
		let json = serde_json::to_string(&role).unwrap();
		let back: Role = serde_json::from_str(&json).unwrap();
		assert!(back.sidebar_defaults.is_none());
		assert!(back.layout_defaults.is_none());
		assert_eq!(back, role);
	}
}

// vim: ts=4
