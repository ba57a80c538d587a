//! Identifier newtypes and common types used throughout dashcfg.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

macro_rules! id_type {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub Box<str>);

		impl $name {
			pub fn new(id: impl Into<Box<str>>) -> Self {
				Self(id.into())
			}

			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl std::borrow::Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}

		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl From<&str> for $name {
			fn from(id: &str) -> Self {
				Self(id.into())
			}
		}

		impl From<String> for $name {
			fn from(id: String) -> Self {
				Self(id.into_boxed_str())
			}
		}
	};
}

id_type!(
	/// Sidebar (navigation) item identifier
	ItemId
);
id_type!(
	/// Dashboard widget identifier
	WidgetId
);
id_type!(
	/// Permission resource identifier (e.g. "leads")
	ResourceId
);
id_type!(
	/// Permission action identifier (e.g. "export")
	ActionId
);
id_type!(RoleId);
id_type!(UserId);

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// ApiResponse //
//*************//
/// Envelope of every successful API response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
	pub data: T,
	pub time: Timestamp,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub req_id: Option<String>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, time: Timestamp::now(), req_id: None }
	}

	pub fn with_req_id(mut self, req_id: Option<String>) -> Self {
		self.req_id = req_id;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn test_id_lookup_by_str() {
		let mut map = HashMap::new();
		map.insert(ItemId::from("billing"), false);
		assert_eq!(map.get("billing"), Some(&false));
		assert_eq!(map.get("leads"), None);
	}

	#[test]
	fn test_id_serializes_transparently() {
		let id = WidgetId::from("stat_leads");
		assert_eq!(serde_json::to_string(&id).unwrap(), "\"stat_leads\"");
		let back: WidgetId = serde_json::from_str("\"lead_trend\"").unwrap();
		assert_eq!(back.as_str(), "lead_trend");
	}

	#[test]
	fn test_api_response_envelope() {
		let res = ApiResponse::new(true).with_req_id(None);
		let json = serde_json::to_value(&res).unwrap();
		assert_eq!(json["data"], serde_json::json!(true));
		assert!(json.get("reqId").is_none());
	}
}

// vim: ts=4
