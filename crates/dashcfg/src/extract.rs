//! Request identity and extractors
//!
//! Identity is asserted by an upstream auth layer through headers:
//! `X-User-Id` (required on protected routes) and `X-Roles` (comma separated).

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, Response};
use axum::middleware::Next;

use crate::prelude::*;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ROLES_HEADER: &str = "x-roles";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone)]
pub struct AuthCtx {
	pub user_id: UserId,
	pub roles: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
		let user_id = headers
			.get(USER_ID_HEADER)
			.and_then(|h| h.to_str().ok())
			.map(str::trim)
			.filter(|s| !s.is_empty())?;
		let roles = headers
			.get(ROLES_HEADER)
			.and_then(|h| h.to_str().ok())
			.map(|s| {
				s.split(',').map(str::trim).filter(|r| !r.is_empty()).map(Box::from).collect()
			})
			.unwrap_or_default();
		Some(AuthCtx { user_id: user_id.into(), roles })
	}

	pub fn is_admin(&self) -> bool {
		self.roles.iter().any(|r| r.as_ref() == ADMIN_ROLE)
	}

	/// Fails with `PermissionDenied` unless the caller holds the admin role
	pub fn require_admin(&self) -> ClResult<()> {
		if self.is_admin() {
			Ok(())
		} else {
			warn!("User {} denied admin operation", self.user_id);
			Err(Error::PermissionDenied)
		}
	}
}

/// Middleware rejecting requests without an identity
pub async fn require_auth(mut req: Request<Body>, next: Next) -> ClResult<Response<Body>> {
	let auth = AuthCtx::from_headers(req.headers()).ok_or(Error::Unauthorized)?;
	req.extensions_mut().insert(Auth(auth));
	Ok(next.run(req).await)
}

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::Unauthorized)
		}
	}
}

// RequestId //
//***********//
/// Request ID passed through from the caller, if any
#[derive(Clone, Debug)]
pub struct OptionalRequestId(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalRequestId
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let req_id =
			parts.headers.get(REQUEST_ID_HEADER).and_then(|h| h.to_str().ok()).map(String::from);
		Ok(OptionalRequestId(req_id))
	}
}


// vim: ts=4
