//! Adapter that persists roles and personal overrides.
//!
//! Storage is an external collaborator of the configuration core; the core only
//! needs these record-level reads and writes.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::role::{Role, UserOverride};
use crate::types::{RoleId, UserId};

#[async_trait]
pub trait ConfigAdapter: Debug + Send + Sync {
	// Roles
	//*******
	/// Reads a role, `None` if it does not exist (never an error)
	async fn read_role(&self, role_id: &RoleId) -> ClResult<Option<Role>>;

	/// Writes a role wholesale (last write wins).
	///
	/// The adapter assigns the next version and the update timestamp and returns
	/// the stored record.
	async fn write_role(&self, role: &Role) -> ClResult<Role>;

	/// Deletes a role. Personal overrides referencing it must stay untouched.
	/// Returns whether a role was removed.
	async fn delete_role(&self, role_id: &RoleId) -> ClResult<bool>;

	async fn list_roles(&self) -> ClResult<Vec<Role>>;

	// Personal overrides
	//********************
	async fn read_user_override(&self, user_id: &UserId) -> ClResult<Option<UserOverride>>;

	async fn write_user_override(&self, user: &UserOverride) -> ClResult<()>;

	async fn delete_user_override(&self, user_id: &UserId) -> ClResult<bool>;
}

// vim: ts=4
