//! Error type shared by the core, the adapters and the HTTP surface

use axum::{http::StatusCode, response::IntoResponse, Json};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	DbError,
	/// Rejected input; the message names the offending key or widget id
	ValidationError(String),
	/// Invalid code-defined configuration (schema registration)
	ConfigError(String),
	/// Version token mismatch on a role write
	Conflict(String),
	Internal(String),

	// externals
	Io(std::io::Error),
	Json(serde_json::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::DbError => write!(f, "database error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			Error::Json(err) => write!(f, "json error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl Error {
	fn status_and_code(&self) -> (StatusCode, &'static str) {
		match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "E-NOT-FOUND"),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "E-PERMISSION-DENIED"),
			Error::Unauthorized => (StatusCode::UNAUTHORIZED, "E-UNAUTHORIZED"),
			Error::ValidationError(_) | Error::Json(_) => {
				(StatusCode::BAD_REQUEST, "E-VALIDATION")
			}
			Error::Conflict(_) => (StatusCode::CONFLICT, "E-CONFLICT"),
			Error::DbError => (StatusCode::SERVICE_UNAVAILABLE, "E-DB"),
			Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				(StatusCode::INTERNAL_SERVER_ERROR, "E-INTERNAL")
			}
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, code) = self.status_and_code();
		// Internal details stay in the log
		let message = if status.is_server_error() {
			tracing::error!("request failed: {}", self);
			status.canonical_reason().unwrap_or("error").to_string()
		} else {
			self.to_string()
		};
		let body = serde_json::json!({
			"error": {
				"code": code,
				"message": message,
			}
		});
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
