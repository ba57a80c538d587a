//! Role records

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::{from_json, from_json_opt, inspect, to_json};
use dashcfg_types::prelude::*;
use dashcfg_types::role::Role;

const COLUMNS: &str =
	"role_id, name, version, permissions, sidebar_defaults, layout_defaults, updated_at";

fn parse_row(row: &SqliteRow) -> ClResult<Role> {
	let get_err = |err: sqlx::Error| {
		inspect(&err);
		Error::DbError
	};
	let role_id: String = row.try_get("role_id").map_err(get_err)?;
	let name: String = row.try_get("name").map_err(get_err)?;
	let version: i64 = row.try_get("version").map_err(get_err)?;
	let permissions: String = row.try_get("permissions").map_err(get_err)?;
	let sidebar: Option<String> = row.try_get("sidebar_defaults").map_err(get_err)?;
	let layout: Option<String> = row.try_get("layout_defaults").map_err(get_err)?;
	let updated_at: i64 = row.try_get("updated_at").map_err(get_err)?;

	Ok(Role {
		id: role_id.into(),
		name: name.into(),
		version: u64::try_from(version).map_err(|_| Error::DbError)?,
		permissions: from_json("permissions", &permissions)?,
		sidebar_defaults: from_json_opt("sidebar_defaults", sidebar)?,
		layout_defaults: from_json_opt("layout_defaults", layout)?,
		updated_at: Timestamp(updated_at),
	})
}

pub(crate) async fn read(db: &SqlitePool, role_id: &RoleId) -> ClResult<Option<Role>> {
	let row = sqlx::query(&format!("SELECT {} FROM roles WHERE role_id = ?", COLUMNS))
		.bind(role_id.as_str())
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	row.as_ref().map(parse_row).transpose()
}

/// Upsert; the stored version is incremented atomically
pub(crate) async fn write(db: &SqlitePool, role: &Role) -> ClResult<Role> {
	let permissions = to_json(&role.permissions)?;
	let sidebar = role.sidebar_defaults.as_ref().map(to_json).transpose()?;
	let layout = role.layout_defaults.as_ref().map(to_json).transpose()?;
	let now = Timestamp::now();

	let row = sqlx::query(&format!(
		"INSERT INTO roles ({}) VALUES (?1, ?2, 1, ?3, ?4, ?5, ?6)
		ON CONFLICT(role_id) DO UPDATE SET
			name = excluded.name,
			version = roles.version + 1,
			permissions = excluded.permissions,
			sidebar_defaults = excluded.sidebar_defaults,
			layout_defaults = excluded.layout_defaults,
			updated_at = excluded.updated_at
		RETURNING version",
		COLUMNS
	))
	.bind(role.id.as_str())
	.bind(&*role.name)
	.bind(permissions)
	.bind(sidebar)
	.bind(layout)
	.bind(now.0)
	.fetch_one(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	let version: i64 = row.try_get("version").inspect_err(inspect).map_err(|_| Error::DbError)?;
	let mut stored = role.clone();
	stored.version = u64::try_from(version).map_err(|_| Error::DbError)?;
	stored.updated_at = now;
	Ok(stored)
}

pub(crate) async fn delete(db: &SqlitePool, role_id: &RoleId) -> ClResult<bool> {
	let res = sqlx::query("DELETE FROM roles WHERE role_id = ?")
		.bind(role_id.as_str())
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	Ok(res.rows_affected() > 0)
}

pub(crate) async fn list(db: &SqlitePool) -> ClResult<Vec<Role>> {
	let rows = sqlx::query(&format!("SELECT {} FROM roles ORDER BY role_id", COLUMNS))
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	rows.iter().map(parse_row).collect()
}

// vim: ts=4
