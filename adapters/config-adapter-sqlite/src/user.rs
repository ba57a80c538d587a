//! Personal override records

use sqlx::{Row, SqlitePool};

use crate::{from_json, from_json_opt, inspect, to_json};
use dashcfg_types::prelude::*;
use dashcfg_types::role::UserOverride;

pub(crate) async fn read(db: &SqlitePool, user_id: &UserId) -> ClResult<Option<UserOverride>> {
	let row = sqlx::query(
		"SELECT role_id, sidebar_overrides, layout_override, updated_at
		FROM user_overrides WHERE user_id = ?",
	)
	.bind(user_id.as_str())
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	let Some(row) = row else {
		return Ok(None);
	};

	let get_err = |err: sqlx::Error| {
		inspect(&err);
		Error::DbError
	};
	let role_id: Option<String> = row.try_get("role_id").map_err(get_err)?;
	let sidebar: String = row.try_get("sidebar_overrides").map_err(get_err)?;
	let layout: Option<String> = row.try_get("layout_override").map_err(get_err)?;
	let updated_at: i64 = row.try_get("updated_at").map_err(get_err)?;

	Ok(Some(UserOverride {
		user_id: user_id.clone(),
		role_id: role_id.map(RoleId::from),
		sidebar_overrides: from_json("sidebar_overrides", &sidebar)?,
		layout_override: from_json_opt("layout_override", layout)?,
		updated_at: Timestamp(updated_at),
	}))
}

pub(crate) async fn write(db: &SqlitePool, user: &UserOverride) -> ClResult<()> {
	let sidebar = to_json(&user.sidebar_overrides)?;
	let layout = user.layout_override.as_ref().map(to_json).transpose()?;

	sqlx::query(
		"INSERT OR REPLACE INTO user_overrides
		(user_id, role_id, sidebar_overrides, layout_override, updated_at)
		VALUES (?, ?, ?, ?, ?)",
	)
	.bind(user.user_id.as_str())
	.bind(user.role_id.as_ref().map(RoleId::as_str))
	.bind(sidebar)
	.bind(layout)
	.bind(user.updated_at.0)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, user_id: &UserId) -> ClResult<bool> {
	let res = sqlx::query("DELETE FROM user_overrides WHERE user_id = ?")
		.bind(user_id.as_str())
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	Ok(res.rows_affected() > 0)
}

// vim: ts=4
