//! Database schema initialization

use sqlx::SqlitePool;

/// Creates the tables if they do not exist yet
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Roles
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS roles (
		role_id text NOT NULL,
		name text NOT NULL,
		version integer NOT NULL DEFAULT 1,
		permissions json NOT NULL DEFAULT '{}',
		sidebar_defaults json,
		layout_defaults json,
		updated_at integer NOT NULL DEFAULT (unixepoch()),
		PRIMARY KEY(role_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Personal overrides
	//********************
	// role_id has no foreign key, overrides outlive their role
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_overrides (
		user_id text NOT NULL,
		role_id text,
		sidebar_overrides json NOT NULL DEFAULT '{}',
		layout_override json,
		updated_at integer NOT NULL DEFAULT (unixepoch()),
		PRIMARY KEY(user_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_overrides_role ON user_overrides(role_id)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;
	Ok(())
}

// vim: ts=4
