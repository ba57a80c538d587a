use axum::{
	middleware,
	routing::{get, post, put},
	Router,
};
use tower_http::trace::TraceLayer;

use crate::app::App;
use crate::extract::require_auth;
use crate::handler;

pub fn init(state: App) -> Router {
	let protected_router = Router::new()
		// Personal configuration
		.route(
			"/api/config/me",
			get(handler::get_config).put(handler::put_config).delete(handler::delete_config),
		)
		.route("/api/config/me/layouts", get(handler::get_layouts))
		.route("/api/layout/toggle", post(handler::post_toggle))
		// Roles
		.route("/api/roles", get(handler::list_roles).post(handler::post_role))
		.route("/api/roles/{role_id}", axum::routing::delete(handler::delete_role))
		.route(
			"/api/roles/{role_id}/defaults",
			get(handler::get_role_defaults).put(handler::put_role_defaults),
		)
		.route("/api/roles/{role_id}/permissions", get(handler::get_role_permissions))
		.route(
			"/api/roles/{role_id}/permissions/{resource}/{action}",
			get(handler::get_permission).put(handler::put_permission),
		)
		.route("/api/users/{user_id}/role", put(handler::put_user_role))
		.layer(middleware::from_fn(require_auth));

	let public_router = Router::new()
		.route("/api/schema", get(handler::get_schema))
		.route("/api/permissions/schema", get(handler::get_permission_schema));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

// vim: ts=4
