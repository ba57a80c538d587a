//! HTTP API tests driving the router in-process

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use dashcfg::{routes, AppBuilder};
use dashcfg_config_adapter_sqlite::ConfigAdapterSqlite;

async fn create_test_router() -> (Router, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = ConfigAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter");

	let mut builder = AppBuilder::new();
	builder.config_adapter(Arc::new(adapter)).cache_size(16);
	let app = builder.build().expect("Failed to build app");

	(routes::init(app), temp_dir)
}

async fn send(
	router: &Router,
	method: Method,
	uri: &str,
	user: Option<(&str, &str)>,
	body: Option<Value>,
) -> (StatusCode, Value) {
	let mut req = Request::builder().method(method).uri(uri);
	if let Some((user_id, roles)) = user {
		req = req.header("x-user-id", user_id).header("x-roles", roles);
	}
	let req = match body {
		Some(body) => req
			.header("content-type", "application/json")
			.body(Body::from(body.to_string()))
			.unwrap(),
		None => req.body(Body::empty()).unwrap(),
	};

	let res = router.clone().oneshot(req).await.unwrap();
	let status = res.status();
	let bytes = res.into_body().collect().await.unwrap().to_bytes();
	let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
	(status, value)
}

const ADMIN: Option<(&str, &str)> = Some(("root", "admin"));
const ALICE: Option<(&str, &str)> = Some(("alice", "sales"));

#[tokio::test]
async fn test_config_requires_identity() {
	let (router, _temp) = create_test_router().await;
	let (status, body) = send(&router, Method::GET, "/api/config/me", None, None).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["error"]["code"], "E-UNAUTHORIZED");
}

#[tokio::test]
async fn test_default_config() {
	let (router, _temp) = create_test_router().await;
	let (status, body) = send(&router, Method::GET, "/api/config/me", ALICE, None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["sidebarVisibility"]["leads"], true);
	assert_eq!(body["data"]["sidebarVisibility"]["analytics"], false);
	assert_eq!(body["data"]["layout"][0]["widgetId"], "stat_leads");
}

#[tokio::test]
async fn test_role_and_personal_overrides() {
	let (router, _temp) = create_test_router().await;

	let (status, _) =
		send(&router, Method::POST, "/api/roles", ADMIN, Some(json!({"id": "sales", "name": "Sales"})))
			.await;
	assert_eq!(status, StatusCode::CREATED);
	let (status, _) =
		send(&router, Method::PUT, "/api/users/alice/role", ADMIN, Some(json!({"roleId": "sales"})))
			.await;
	assert_eq!(status, StatusCode::NO_CONTENT);
	let (status, body) = send(
		&router,
		Method::PUT,
		"/api/roles/sales/defaults",
		ADMIN,
		Some(json!({"sidebarDefaults": {"billing": false}})),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["version"], 2);

	let (_, body) = send(&router, Method::GET, "/api/config/me", ALICE, None).await;
	assert_eq!(body["data"]["sidebarVisibility"]["billing"], false);

	let (status, body) = send(
		&router,
		Method::PUT,
		"/api/config/me",
		ALICE,
		Some(json!({"sidebarOverrides": {"billing": true}})),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["sidebarVisibility"]["billing"], true);

	let (status, body) = send(&router, Method::DELETE, "/api/config/me", ALICE, None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["sidebarVisibility"]["billing"], false);
}

#[tokio::test]
async fn test_admin_operations_denied_for_users() {
	let (router, _temp) = create_test_router().await;
	let (status, body) =
		send(&router, Method::POST, "/api/roles", ALICE, Some(json!({"id": "x", "name": "X"}))).await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["error"]["code"], "E-PERMISSION-DENIED");

	let (status, _) = send(
		&router,
		Method::PUT,
		"/api/roles/sales/defaults",
		ALICE,
		Some(json!({"sidebarDefaults": {}})),
	)
	.await;
	assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_version_conflict() {
	let (router, _temp) = create_test_router().await;
	send(&router, Method::POST, "/api/roles", ADMIN, Some(json!({"id": "sales", "name": "Sales"})))
		.await;

	let (status, body) = send(
		&router,
		Method::PUT,
		"/api/roles/sales/defaults",
		ADMIN,
		Some(json!({"sidebarDefaults": {"team": false}, "expectedVersion": 7})),
	)
	.await;
	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["error"]["code"], "E-CONFLICT");
}

#[tokio::test]
async fn test_invalid_layout_names_widget() {
	let (router, _temp) = create_test_router().await;
	let (status, body) = send(
		&router,
		Method::PUT,
		"/api/config/me",
		ALICE,
		Some(json!({"layoutOverride": [{"widgetId": "lead_trend", "x": 8, "y": 0, "w": 8, "h": 4}]})),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body["error"]["message"].as_str().unwrap().contains("lead_trend"));

	let (status, body) = send(
		&router,
		Method::PUT,
		"/api/config/me",
		ALICE,
		Some(json!({"sidebarOverrides": {"payroll": true}})),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body["error"]["message"].as_str().unwrap().contains("payroll"));
}

#[tokio::test]
async fn test_toggle_endpoint() {
	let (router, _temp) = create_test_router().await;
	let layout = json!([{"widgetId": "stat_leads", "x": 0, "y": 0, "w": 4, "h": 2}]);

	let (status, body) = send(
		&router,
		Method::POST,
		"/api/layout/toggle",
		ALICE,
		Some(json!({"layout": layout, "widgetId": "lead_trend"})),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	let added = &body["data"][1];
	assert_eq!(added["widgetId"], "lead_trend");
	assert_eq!((added["x"].as_u64(), added["y"].as_u64()), (Some(0), Some(2)));

	let (status, body) = send(
		&router,
		Method::POST,
		"/api/layout/toggle",
		ALICE,
		Some(json!({"layout": body["data"], "widgetId": "lead_trend"})),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_responsive_layouts() {
	let (router, _temp) = create_test_router().await;
	let (status, body) = send(&router, Method::GET, "/api/config/me/layouts", ALICE, None).await;
	assert_eq!(status, StatusCode::OK);
	for (bp, cols) in [("lg", 12), ("md", 10), ("sm", 6), ("xs", 4), ("xxs", 2)] {
		for p in body["data"][bp].as_array().unwrap() {
			let right = p["x"].as_u64().unwrap() + p["w"].as_u64().unwrap();
			assert!(right <= cols, "{} overflows at {}", p["widgetId"], bp);
		}
	}
}

#[tokio::test]
async fn test_permissions() {
	let (router, _temp) = create_test_router().await;
	send(&router, Method::POST, "/api/roles", ADMIN, Some(json!({"id": "sales", "name": "Sales"})))
		.await;

	let (_, body) =
		send(&router, Method::GET, "/api/roles/sales/permissions/leads/delete", ALICE, None).await;
	assert_eq!(body["data"]["granted"], false);

	let (status, body) = send(
		&router,
		Method::PUT,
		"/api/roles/sales/permissions/leads/delete",
		ADMIN,
		Some(json!({"granted": true})),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["granted"], true);

	let (_, body) =
		send(&router, Method::GET, "/api/roles/sales/permissions/leads/delete", ALICE, None).await;
	assert_eq!(body["data"]["granted"], true);

	let (_, body) =
		send(&router, Method::GET, "/api/roles/sales/permissions/payroll/view", ALICE, None).await;
	assert_eq!(body["data"]["granted"], false);

	let (status, _) = send(
		&router,
		Method::PUT,
		"/api/roles/sales/permissions/payroll/view",
		ADMIN,
		Some(json!({"granted": true})),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_public_schema_endpoints() {
	let (router, _temp) = create_test_router().await;
	let (status, body) = send(&router, Method::GET, "/api/permissions/schema", None, None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["resources"]["leads"]["view"]["defaultEnabled"], true);

	let (status, body) = send(&router, Method::GET, "/api/schema", None, None).await;
	assert_eq!(status, StatusCode::OK);
	assert!(body["data"]["widgets"].as_array().unwrap().len() >= 9);
}

#[tokio::test]
async fn test_delete_role() {
	let (router, _temp) = create_test_router().await;
	send(&router, Method::POST, "/api/roles", ADMIN, Some(json!({"id": "sales", "name": "Sales"})))
		.await;
	let (status, _) = send(&router, Method::DELETE, "/api/roles/sales", ADMIN, None).await;
	assert_eq!(status, StatusCode::NO_CONTENT);
	let (status, _) = send(&router, Method::DELETE, "/api/roles/sales", ADMIN, None).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (_, body) = send(&router, Method::GET, "/api/roles/sales/defaults", ALICE, None).await;
	assert_eq!(body["data"]["version"], 0);
}

// vim: ts=4
