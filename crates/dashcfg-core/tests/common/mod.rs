//! In-memory `ConfigAdapter` for service tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use dashcfg_core::schema::default_schema;
use dashcfg_core::ConfigService;
use dashcfg_types::config_adapter::ConfigAdapter;
use dashcfg_types::prelude::*;
use dashcfg_types::role::{Role, UserOverride};

#[derive(Debug, Default)]
pub struct MemoryAdapter {
	roles: Mutex<HashMap<RoleId, Role>>,
	users: Mutex<HashMap<UserId, UserOverride>>,
}

#[async_trait]
impl ConfigAdapter for MemoryAdapter {
	async fn read_role(&self, role_id: &RoleId) -> ClResult<Option<Role>> {
		Ok(self.roles.lock().get(role_id).cloned())
	}

	async fn write_role(&self, role: &Role) -> ClResult<Role> {
		let mut roles = self.roles.lock();
		let version = roles.get(&role.id).map_or(0, |r| r.version) + 1;
		let mut stored = role.clone();
		stored.version = version;
		stored.updated_at = Timestamp::now();
		roles.insert(stored.id.clone(), stored.clone());
		Ok(stored)
	}

	async fn delete_role(&self, role_id: &RoleId) -> ClResult<bool> {
		Ok(self.roles.lock().remove(role_id).is_some())
	}

	async fn list_roles(&self) -> ClResult<Vec<Role>> {
		let mut roles: Vec<Role> = self.roles.lock().values().cloned().collect();
		roles.sort_by(|a, b| a.id.cmp(&b.id));
		Ok(roles)
	}

	async fn read_user_override(&self, user_id: &UserId) -> ClResult<Option<UserOverride>> {
		Ok(self.users.lock().get(user_id).cloned())
	}

	async fn write_user_override(&self, user: &UserOverride) -> ClResult<()> {
		self.users.lock().insert(user.user_id.clone(), user.clone());
		Ok(())
	}

	async fn delete_user_override(&self, user_id: &UserId) -> ClResult<bool> {
		Ok(self.users.lock().remove(user_id).is_some())
	}
}

pub fn service() -> (ConfigService, Arc<MemoryAdapter>) {
	let adapter = Arc::new(MemoryAdapter::default());
	let schema = Arc::new(default_schema().unwrap());
	(ConfigService::new(schema, adapter.clone(), 100), adapter)
}

/// Adapter that, once armed, parks the next user override read after it
/// returns its data until `release` is notified
#[derive(Debug, Default)]
pub struct GatedAdapter {
	inner: MemoryAdapter,
	pub armed: AtomicBool,
	pub read_done: Notify,
	pub release: Notify,
}

#[async_trait]
impl ConfigAdapter for GatedAdapter {
	async fn read_role(&self, role_id: &RoleId) -> ClResult<Option<Role>> {
		self.inner.read_role(role_id).await
	}

	async fn write_role(&self, role: &Role) -> ClResult<Role> {
		self.inner.write_role(role).await
	}

	async fn delete_role(&self, role_id: &RoleId) -> ClResult<bool> {
		self.inner.delete_role(role_id).await
	}

	async fn list_roles(&self) -> ClResult<Vec<Role>> {
		self.inner.list_roles().await
	}

	async fn read_user_override(&self, user_id: &UserId) -> ClResult<Option<UserOverride>> {
		let user = self.inner.read_user_override(user_id).await?;
		if self.armed.swap(false, Ordering::SeqCst) {
			self.read_done.notify_one();
			self.release.notified().await;
		}
		Ok(user)
	}

	async fn write_user_override(&self, user: &UserOverride) -> ClResult<()> {
		self.inner.write_user_override(user).await
	}

	async fn delete_user_override(&self, user_id: &UserId) -> ClResult<bool> {
		self.inner.delete_user_override(user_id).await
	}
}

#[allow(dead_code)]
pub fn gated_service() -> (Arc<ConfigService>, Arc<GatedAdapter>) {
	let adapter = Arc::new(GatedAdapter::default());
	let schema = Arc::new(default_schema().unwrap());
	(Arc::new(ConfigService::new(schema, adapter.clone(), 100)), adapter)
}

// vim: ts=4
