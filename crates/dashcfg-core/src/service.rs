//! Config service: the read/write interface collaborators call
//!
//! Wraps the pure resolve/toggle/project pipeline with storage access through a
//! `ConfigAdapter`, boundary validation, and a cache of computed configs.

use lru::LruCache;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::prelude::*;
use crate::schema::{FrozenSchema, PermissionSchema, SchemaView};
use crate::{permission, projector, resolver, toggle, validate};
use dashcfg_types::config_adapter::ConfigAdapter;
use dashcfg_types::layout::{Breakpoint, Layout, ResponsiveLayouts};
use dashcfg_types::role::{
	EffectiveConfig, PersonalConfigPatch, Role, RoleDefaults, RoleDefaultsPatch, UserOverride,
};

/// (user, role the user pointed at, that role's version; 0 if missing)
type CacheKey = (UserId, Option<RoleId>, u64);

const DEFAULT_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(1000) {
	Some(n) => n,
	None => NonZeroUsize::MIN,
};

/// LRU cache of computed effective configs
///
/// Every invalidation bumps a generation counter; a result resolved from
/// reads that started before an invalidation is rejected by `put_if_current`.
pub struct EffectiveConfigCache {
	cache: RwLock<LruCache<CacheKey, EffectiveConfig>>,
	generation: AtomicU64,
}

impl EffectiveConfigCache {
	pub fn new(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CACHE_SIZE);
		Self { cache: RwLock::new(LruCache::new(capacity)), generation: AtomicU64::new(0) }
	}

	pub fn get(&self, key: &CacheKey) -> Option<EffectiveConfig> {
		self.cache.write().get(key).cloned()
	}

	/// Current invalidation generation
	pub fn generation(&self) -> u64 {
		self.generation.load(Ordering::Acquire)
	}

	/// Stores the value unless an invalidation happened since `generation`
	///
	/// Returns whether the value was stored.
	pub fn put_if_current(&self, key: CacheKey, value: EffectiveConfig, generation: u64) -> bool {
		let mut cache = self.cache.write();
		// Invalidations bump the counter while holding the write lock
		if self.generation.load(Ordering::Acquire) != generation {
			return false;
		}
		cache.put(key, value);
		true
	}

	/// Drop every entry of one user
	pub fn invalidate_user(&self, user_id: &UserId) {
		let mut cache = self.cache.write();
		self.generation.fetch_add(1, Ordering::AcqRel);
		let keys: Vec<CacheKey> =
			cache.iter().filter(|(k, _)| &k.0 == user_id).map(|(k, _)| k.clone()).collect();
		for key in keys {
			cache.pop(&key);
		}
	}

	pub fn clear(&self) {
		let mut cache = self.cache.write();
		self.generation.fetch_add(1, Ordering::AcqRel);
		cache.clear();
	}

	pub fn len(&self) -> usize {
		self.cache.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.read().is_empty()
	}
}

pub struct ConfigService {
	schema: Arc<FrozenSchema>,
	adapter: Arc<dyn ConfigAdapter>,
	cache: EffectiveConfigCache,
}

impl ConfigService {
	pub fn new(schema: Arc<FrozenSchema>, adapter: Arc<dyn ConfigAdapter>, cache_size: usize) -> Self {
		Self { schema, adapter, cache: EffectiveConfigCache::new(cache_size) }
	}

	pub fn schema(&self) -> &Arc<FrozenSchema> {
		&self.schema
	}

	pub fn cache(&self) -> &EffectiveConfigCache {
		&self.cache
	}

	async fn load_role(&self, role_id: Option<&RoleId>) -> ClResult<Option<Role>> {
		let Some(role_id) = role_id else {
			return Ok(None);
		};
		let role = self.adapter.read_role(role_id).await?;
		if role.is_none() {
			debug!("Role '{}' not found, falling back to schema defaults", role_id);
		}
		Ok(role)
	}

	async fn require_role(&self, role_id: &RoleId) -> ClResult<Role> {
		self.adapter.read_role(role_id).await?.ok_or(Error::NotFound)
	}

	fn validate_layout(&self, layout: &Layout) -> ClResult<()> {
		validate::validate_widget_ids(layout, &self.schema)?;
		validate::validate_layout(layout, Breakpoint::REFERENCE.columns())?;
		projector::check_bounds(&projector::project(layout))
	}

	// Effective configuration
	//*************************
	pub async fn get_effective_config(&self, user_id: &UserId) -> ClResult<EffectiveConfig> {
		let generation = self.cache.generation();
		let user = self.adapter.read_user_override(user_id).await?;
		let role_id = user.as_ref().and_then(|u| u.role_id.clone());
		let role = self.load_role(role_id.as_ref()).await?;

		let key = (user_id.clone(), role_id, role.as_ref().map_or(0, |r| r.version));
		if let Some(config) = self.cache.get(&key) {
			debug!("Effective config cache hit: {}", user_id);
			return Ok(config);
		}

		let config = resolver::resolve(user.as_ref(), role.as_ref(), &self.schema);
		if !self.cache.put_if_current(key, config.clone(), generation) {
			debug!("Effective config of {} changed while resolving, not cached", user_id);
		}
		Ok(config)
	}

	/// Effective layout projected to every breakpoint
	pub async fn get_responsive_layouts(&self, user_id: &UserId) -> ClResult<ResponsiveLayouts> {
		let config = self.get_effective_config(user_id).await?;
		let layouts = projector::project(&config.layout);
		projector::check_bounds(&layouts)?;
		Ok(layouts)
	}

	pub async fn save_personal_config(
		&self,
		user_id: &UserId,
		patch: PersonalConfigPatch,
	) -> ClResult<EffectiveConfig> {
		if let Some(sidebar) = &patch.sidebar_overrides {
			validate::validate_sidebar_keys(sidebar, &self.schema)?;
		}
		if let Some(layout) = &patch.layout_override {
			self.validate_layout(layout)?;
		}

		let mut user = self
			.adapter
			.read_user_override(user_id)
			.await?
			.unwrap_or_else(|| UserOverride::new(user_id.clone(), None));
		if let Some(sidebar) = patch.sidebar_overrides {
			user.sidebar_overrides = sidebar;
		}
		if let Some(layout) = patch.layout_override {
			user.layout_override = Some(layout);
		}
		user.updated_at = Timestamp::now();

		self.adapter.write_user_override(&user).await?;
		self.cache.invalidate_user(user_id);
		info!("Personal config saved for user {}", user_id);

		self.get_effective_config(user_id).await
	}

	/// Drops personal overrides; the role assignment is kept
	pub async fn reset_personal_config(&self, user_id: &UserId) -> ClResult<EffectiveConfig> {
		if let Some(mut user) = self.adapter.read_user_override(user_id).await? {
			if user.role_id.is_some() {
				user.sidebar_overrides.clear();
				user.layout_override = None;
				user.updated_at = Timestamp::now();
				self.adapter.write_user_override(&user).await?;
			} else {
				self.adapter.delete_user_override(user_id).await?;
			}
			self.cache.invalidate_user(user_id);
			info!("Personal config reset for user {}", user_id);
		}
		self.get_effective_config(user_id).await
	}

	// Role defaults
	//***************
	/// Defaults of a role; an unknown role has no defaults of its own
	pub async fn get_role_defaults(&self, role_id: &RoleId) -> ClResult<RoleDefaults> {
		Ok(self.adapter.read_role(role_id).await?.as_ref().map(RoleDefaults::from).unwrap_or_default())
	}

	/// Saves role defaults; last write wins unless `expected_version` is given
	pub async fn save_role_defaults(
		&self,
		role_id: &RoleId,
		patch: RoleDefaultsPatch,
	) -> ClResult<RoleDefaults> {
		if let Some(sidebar) = &patch.sidebar_defaults {
			validate::validate_sidebar_keys(sidebar, &self.schema)?;
		}
		if let Some(layout) = &patch.layout_defaults {
			self.validate_layout(layout)?;
		}

		let mut role = self.require_role(role_id).await?;
		if let Some(expected) = patch.expected_version {
			if expected != role.version {
				warn!(
					"Role '{}' write rejected: expected version {}, stored {}",
					role_id, expected, role.version
				);
				return Err(Error::Conflict(format!(
					"role '{}' is at version {}, not {}",
					role_id, role.version, expected
				)));
			}
		}
		if let Some(sidebar) = patch.sidebar_defaults {
			role.sidebar_defaults = Some(sidebar);
		}
		if let Some(layout) = patch.layout_defaults {
			role.layout_defaults = Some(layout);
		}

		let role = self.adapter.write_role(&role).await?;
		info!("Role defaults saved for {} (version {})", role_id, role.version);
		Ok(RoleDefaults::from(&role))
	}

	// Roles
	//*******
	pub async fn create_role(&self, role_id: &RoleId, name: &str) -> ClResult<Role> {
		if self.adapter.read_role(role_id).await?.is_some() {
			return Err(Error::Conflict(format!("role '{}' already exists", role_id)));
		}
		let role = self.adapter.write_role(&Role::new(role_id.clone(), name)).await?;
		info!("Role {} created", role_id);
		Ok(role)
	}

	/// Deletes a role; users pointing at it fall back to schema defaults
	pub async fn delete_role(&self, role_id: &RoleId) -> ClResult<bool> {
		let deleted = self.adapter.delete_role(role_id).await?;
		if deleted {
			self.cache.clear();
			info!("Role {} deleted", role_id);
		}
		Ok(deleted)
	}

	pub async fn list_roles(&self) -> ClResult<Vec<Role>> {
		self.adapter.list_roles().await
	}

	pub async fn assign_role(&self, user_id: &UserId, role_id: &RoleId) -> ClResult<()> {
		self.require_role(role_id).await?;
		let mut user = self
			.adapter
			.read_user_override(user_id)
			.await?
			.unwrap_or_else(|| UserOverride::new(user_id.clone(), None));
		user.role_id = Some(role_id.clone());
		user.updated_at = Timestamp::now();
		self.adapter.write_user_override(&user).await?;
		self.cache.invalidate_user(user_id);
		info!("User {} assigned to role {}", user_id, role_id);
		Ok(())
	}

	// Permissions
	//*************
	pub fn get_permission_schema(&self) -> PermissionSchema {
		self.schema.permission_schema()
	}

	pub fn get_schema(&self) -> SchemaView<'_> {
		self.schema.view()
	}

	pub async fn check_permission(
		&self,
		role_id: &RoleId,
		resource: &str,
		action: &str,
	) -> ClResult<bool> {
		let role = self.load_role(Some(role_id)).await?;
		Ok(permission::grants(role.as_ref(), resource, action, &self.schema))
	}

	pub async fn role_permissions(
		&self,
		role_id: &RoleId,
	) -> ClResult<BTreeMap<ResourceId, BTreeMap<ActionId, bool>>> {
		let role = self.load_role(Some(role_id)).await?;
		if let Some(role) = &role {
			for (resource, action) in permission::unknown_grants(role, &self.schema) {
				warn!("schema drift: role {} grants unknown {}.{}", role.id, resource, action);
			}
		}
		Ok(permission::effective_permissions(role.as_ref(), &self.schema))
	}

	pub async fn set_permission(
		&self,
		role_id: &RoleId,
		resource: &ResourceId,
		action: &ActionId,
		granted: bool,
	) -> ClResult<Role> {
		let role = self.require_role(role_id).await?;
		let role = permission::set_grant(&role, resource, action, granted, &self.schema)?;
		let role = self.adapter.write_role(&role).await?;
		info!("Role {} permission {}.{} set to {}", role_id, resource, action, granted);
		Ok(role)
	}

	// Layout editing
	//****************
	pub fn toggle_widget(&self, layout: &Layout, widget_id: &WidgetId) -> ClResult<Layout> {
		if self.schema.widget(widget_id.as_str()).is_none() {
			return Err(Error::ValidationError(format!("unknown widget '{}'", widget_id)));
		}
		validate::validate_layout(layout, Breakpoint::REFERENCE.columns())?;
		Ok(toggle::toggle(layout, widget_id, self.schema.category_defaults()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn config() -> EffectiveConfig {
		EffectiveConfig { sidebar_visibility: HashMap::new(), layout: Vec::new() }
	}

	#[test]
	fn test_stale_put_is_dropped() {
		let cache = EffectiveConfigCache::new(4);
		let key: CacheKey = ("alice".into(), None, 0);

		let generation = cache.generation();
		cache.invalidate_user(&"alice".into());
		assert!(!cache.put_if_current(key.clone(), config(), generation));
		assert!(cache.get(&key).is_none());

		assert!(cache.put_if_current(key.clone(), config(), cache.generation()));
		assert!(cache.get(&key).is_some());
	}

	#[test]
	fn test_clear_bumps_generation() {
		let cache = EffectiveConfigCache::new(4);
		let generation = cache.generation();
		cache.clear();
		assert!(!cache.put_if_current(("bob".into(), None, 0), config(), generation));
		assert!(cache.is_empty());
	}
}

// vim: ts=4
