//! SQLite storage adapter for roles and personal overrides.
//!
//! Structured fields (permission matrix, sidebar maps, layouts) are stored as
//! JSON text columns. Every role write bumps its version.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use dashcfg_types::config_adapter::ConfigAdapter;
use dashcfg_types::prelude::*;
use dashcfg_types::role::{Role, UserOverride};

mod role;
mod schema;
mod user;

const DB_FILE: &str = "dashcfg.db";

pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> ClResult<String> {
	serde_json::to_string(value).map_err(|err| {
		warn!("DB: serialize failed: {}", err);
		Error::DbError
	})
}

pub(crate) fn from_json<T: DeserializeOwned>(column: &str, value: &str) -> ClResult<T> {
	serde_json::from_str(value).map_err(|err| {
		warn!("DB: corrupt {} column: {}", column, err);
		Error::DbError
	})
}

pub(crate) fn from_json_opt<T: DeserializeOwned>(
	column: &str,
	value: Option<String>,
) -> ClResult<Option<T>> {
	value.map(|v| from_json(column, &v)).transpose()
}

#[derive(Debug)]
pub struct ConfigAdapterSqlite {
	db: SqlitePool,
}

impl ConfigAdapterSqlite {
	/// Opens (or creates) the database inside `dir`
	pub async fn new(dir: impl AsRef<Path>) -> ClResult<Self> {
		let dir = dir.as_ref();
		tokio::fs::create_dir_all(dir).await?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.join(DB_FILE))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
		info!("Config database opened at {}", dir.display());

		Ok(Self { db })
	}
}

#[async_trait]
impl ConfigAdapter for ConfigAdapterSqlite {
	// Roles
	//*******
	async fn read_role(&self, role_id: &RoleId) -> ClResult<Option<Role>> {
		role::read(&self.db, role_id).await
	}

	async fn write_role(&self, role: &Role) -> ClResult<Role> {
		role::write(&self.db, role).await
	}

	async fn delete_role(&self, role_id: &RoleId) -> ClResult<bool> {
		role::delete(&self.db, role_id).await
	}

	async fn list_roles(&self) -> ClResult<Vec<Role>> {
		role::list(&self.db).await
	}

	// Personal overrides
	//********************
	async fn read_user_override(&self, user_id: &UserId) -> ClResult<Option<UserOverride>> {
		user::read(&self.db, user_id).await
	}

	async fn write_user_override(&self, user: &UserOverride) -> ClResult<()> {
		user::write(&self.db, user).await
	}

	async fn delete_user_override(&self, user_id: &UserId) -> ClResult<bool> {
		user::delete(&self.db, user_id).await
	}
}

// vim: ts=4
