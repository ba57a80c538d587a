//! Configuration API handlers

use axum::{
	extract::{Path, State},
	http::StatusCode,
	Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::extract::{Auth, OptionalRequestId};
use crate::prelude::*;
use dashcfg_core::schema::{ItemDefinition, PermissionSchema, SchemaView};
use dashcfg_types::layout::{Layout, ResponsiveLayouts};
use dashcfg_types::role::{
	EffectiveConfig, PersonalConfigPatch, Role, RoleDefaults, RoleDefaultsPatch,
};
use dashcfg_types::types::ApiResponse;

type ApiResult<T> = ClResult<(StatusCode, Json<ApiResponse<T>>)>;

fn ok<T>(data: T, req_id: Option<String>) -> ApiResult<T> {
	Ok((StatusCode::OK, Json(ApiResponse::new(data).with_req_id(req_id))))
}

/// Role as listed over the API; the matrix is exposed separately
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
	pub id: RoleId,
	pub name: Box<str>,
	pub version: u64,
	pub updated_at: Timestamp,
}

impl From<Role> for RoleResponse {
	fn from(role: Role) -> Self {
		Self { id: role.id, name: role.name, version: role.version, updated_at: role.updated_at }
	}
}

// Personal configuration
//************************
/// GET /api/config/me
pub async fn get_config(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<EffectiveConfig> {
	let config = app.config.get_effective_config(&auth.user_id).await?;
	ok(config, req_id)
}

/// PUT /api/config/me
pub async fn put_config(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(patch): Json<PersonalConfigPatch>,
) -> ApiResult<EffectiveConfig> {
	let config = app.config.save_personal_config(&auth.user_id, patch).await?;
	ok(config, req_id)
}

/// DELETE /api/config/me
pub async fn delete_config(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<EffectiveConfig> {
	let config = app.config.reset_personal_config(&auth.user_id).await?;
	ok(config, req_id)
}

/// GET /api/config/me/layouts
pub async fn get_layouts(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<ResponsiveLayouts> {
	let layouts = app.config.get_responsive_layouts(&auth.user_id).await?;
	ok(layouts, req_id)
}

// Layout editing
//****************
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
	pub layout: Layout,
	pub widget_id: WidgetId,
}

/// POST /api/layout/toggle
///
/// Pure transformation; the result is not persisted.
pub async fn post_toggle(
	State(app): State<App>,
	Auth(_auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(req): Json<ToggleRequest>,
) -> ApiResult<Layout> {
	let layout = app.config.toggle_widget(&req.layout, &req.widget_id)?;
	ok(layout, req_id)
}

// Schema
//********
/// Owned copy of the schema view
#[derive(Serialize)]
pub struct SchemaResponse {
	pub sidebar: Vec<ItemDefinition>,
	pub widgets: Vec<ItemDefinition>,
}

impl From<SchemaView<'_>> for SchemaResponse {
	fn from(view: SchemaView<'_>) -> Self {
		Self {
			sidebar: view.sidebar.into_iter().cloned().collect(),
			widgets: view.widgets.into_iter().cloned().collect(),
		}
	}
}

/// GET /api/schema
pub async fn get_schema(
	State(app): State<App>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<SchemaResponse> {
	ok(app.config.get_schema().into(), req_id)
}

/// GET /api/permissions/schema
pub async fn get_permission_schema(
	State(app): State<App>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<PermissionSchema> {
	ok(app.config.get_permission_schema(), req_id)
}

// Roles
//*******
#[derive(Deserialize)]
pub struct CreateRoleRequest {
	pub id: RoleId,
	pub name: String,
}

/// GET /api/roles
pub async fn list_roles(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<Vec<RoleResponse>> {
	auth.require_admin()?;
	let roles = app.config.list_roles().await?;
	ok(roles.into_iter().map(RoleResponse::from).collect(), req_id)
}

/// POST /api/roles
pub async fn post_role(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(req): Json<CreateRoleRequest>,
) -> ClResult<(StatusCode, Json<ApiResponse<RoleResponse>>)> {
	auth.require_admin()?;
	let role = app.config.create_role(&req.id, &req.name).await?;
	info!("User {} created role {}", auth.user_id, role.id);
	Ok((StatusCode::CREATED, Json(ApiResponse::new(role.into()).with_req_id(req_id))))
}

/// DELETE /api/roles/{role_id}
pub async fn delete_role(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(role_id): Path<RoleId>,
) -> ClResult<StatusCode> {
	auth.require_admin()?;
	if app.config.delete_role(&role_id).await? {
		Ok(StatusCode::NO_CONTENT)
	} else {
		Err(Error::NotFound)
	}
}

/// GET /api/roles/{role_id}/defaults
pub async fn get_role_defaults(
	State(app): State<App>,
	Auth(_auth): Auth,
	Path(role_id): Path<RoleId>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<RoleDefaults> {
	let defaults = app.config.get_role_defaults(&role_id).await?;
	ok(defaults, req_id)
}

/// PUT /api/roles/{role_id}/defaults
pub async fn put_role_defaults(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(role_id): Path<RoleId>,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(patch): Json<RoleDefaultsPatch>,
) -> ApiResult<RoleDefaults> {
	auth.require_admin()?;
	let defaults = app.config.save_role_defaults(&role_id, patch).await?;
	info!("User {} updated defaults of role {}", auth.user_id, role_id);
	ok(defaults, req_id)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
	pub role_id: RoleId,
}

/// PUT /api/users/{user_id}/role
pub async fn put_user_role(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(user_id): Path<UserId>,
	Json(req): Json<AssignRoleRequest>,
) -> ClResult<StatusCode> {
	auth.require_admin()?;
	app.config.assign_role(&user_id, &req.role_id).await?;
	Ok(StatusCode::NO_CONTENT)
}

// Permissions
//*************
#[derive(Serialize)]
pub struct PermissionResponse {
	pub granted: bool,
}

#[derive(Deserialize)]
pub struct SetPermissionRequest {
	pub granted: bool,
}

/// GET /api/roles/{role_id}/permissions
pub async fn get_role_permissions(
	State(app): State<App>,
	Auth(_auth): Auth,
	Path(role_id): Path<RoleId>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<BTreeMap<ResourceId, BTreeMap<ActionId, bool>>> {
	let perms = app.config.role_permissions(&role_id).await?;
	ok(perms, req_id)
}

/// GET /api/roles/{role_id}/permissions/{resource}/{action}
pub async fn get_permission(
	State(app): State<App>,
	Auth(_auth): Auth,
	Path((role_id, resource, action)): Path<(RoleId, String, String)>,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ApiResult<PermissionResponse> {
	let granted = app.config.check_permission(&role_id, &resource, &action).await?;
	ok(PermissionResponse { granted }, req_id)
}

/// PUT /api/roles/{role_id}/permissions/{resource}/{action}
pub async fn put_permission(
	State(app): State<App>,
	Auth(auth): Auth,
	Path((role_id, resource, action)): Path<(RoleId, ResourceId, ActionId)>,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(req): Json<SetPermissionRequest>,
) -> ApiResult<PermissionResponse> {
	auth.require_admin()?;
	let role = app.config.set_permission(&role_id, &resource, &action, req.granted).await?;
	let granted = role.permissions.get(resource.as_str(), action.as_str()).unwrap_or(req.granted);
	ok(PermissionResponse { granted }, req_id)
}

// vim: ts=4
