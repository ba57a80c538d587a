//! Layout and key validation performed before anything is persisted

use std::collections::{HashMap, HashSet};

use crate::prelude::*;
use crate::schema::FrozenSchema;
use dashcfg_types::layout::WidgetPlacement;

/// Rejects placements that would overflow `columns`
pub fn check_columns(layout: &[WidgetPlacement], columns: u32) -> ClResult<()> {
	for p in layout {
		if p.right() > columns {
			return Err(Error::ValidationError(format!(
				"widget '{}' exceeds {} columns (x={}, w={})",
				p.widget_id, columns, p.x, p.w
			)));
		}
	}
	Ok(())
}

/// Structural validation of a layout against a column count
pub fn validate_layout(layout: &[WidgetPlacement], columns: u32) -> ClResult<()> {
	let mut seen = HashSet::with_capacity(layout.len());
	for p in layout {
		if !seen.insert(p.widget_id.as_str()) {
			return Err(Error::ValidationError(format!("duplicate widget id '{}'", p.widget_id)));
		}
		if !p.fits_u32() {
			return Err(Error::ValidationError(format!(
				"widget '{}' has out of range geometry",
				p.widget_id
			)));
		}
		if p.w == 0 || p.h == 0 {
			return Err(Error::ValidationError(format!("widget '{}' has an empty size", p.widget_id)));
		}
		if p.min_w.is_some_and(|m| m > p.w) || p.min_h.is_some_and(|m| m > p.h) {
			return Err(Error::ValidationError(format!(
				"widget '{}' is smaller than its minimum size",
				p.widget_id
			)));
		}
	}
	check_columns(layout, columns)
}

/// Every widget must be known to the schema
pub fn validate_widget_ids(layout: &[WidgetPlacement], schema: &FrozenSchema) -> ClResult<()> {
	match layout.iter().find(|p| schema.widget(p.widget_id.as_str()).is_none()) {
		Some(p) => Err(Error::ValidationError(format!("unknown widget '{}'", p.widget_id))),
		None => Ok(()),
	}
}

/// Every sidebar key must be known to the schema
pub fn validate_sidebar_keys(map: &HashMap<ItemId, bool>, schema: &FrozenSchema) -> ClResult<()> {
	match map.keys().find(|id| schema.sidebar_item(id.as_str()).is_none()) {
		Some(id) => Err(Error::ValidationError(format!("unknown sidebar item '{}'", id))),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::default_schema;

	#[test]
	fn test_duplicate_id_rejected() {
		let layout = vec![
			WidgetPlacement::new("stat_leads", 0, 0, 4, 2),
			WidgetPlacement::new("stat_leads", 4, 0, 4, 2),
		];
		let Err(Error::ValidationError(msg)) = validate_layout(&layout, 12) else {
			panic!("expected validation error");
		};
		assert!(msg.contains("stat_leads"));
	}

	#[test]
	fn test_overflow_rejected() {
		let layout = vec![WidgetPlacement::new("lead_trend", 6, 0, 8, 4)];
		assert!(validate_layout(&layout, 12).is_err());
		assert!(validate_layout(&layout, 14).is_ok());
	}

	#[test]
	fn test_overflowing_geometry_rejected() {
		let wide = [WidgetPlacement::new("stat_leads", u32::MAX, 0, 1, 2)];
		let Err(Error::ValidationError(msg)) = validate_layout(&wide, 12) else {
			panic!("expected validation error");
		};
		assert!(msg.contains("stat_leads"));
		assert!(check_columns(&wide, 12).is_err());

		let tall = [WidgetPlacement::new("notes", 0, u32::MAX, 2, 1)];
		assert!(matches!(validate_layout(&tall, 12), Err(Error::ValidationError(_))));
	}

	#[test]
	fn test_empty_and_min_size_rejected() {
		assert!(validate_layout(&[WidgetPlacement::new("a", 0, 0, 0, 2)], 12).is_err());
		let too_small = WidgetPlacement::new("a", 0, 0, 2, 2).with_min(3, 1);
		assert!(validate_layout(&[too_small], 12).is_err());
	}

	#[test]
	fn test_unknown_keys_rejected() {
		let schema = default_schema().unwrap();
		let layout = vec![WidgetPlacement::new("weather", 0, 0, 2, 2)];
		assert!(validate_widget_ids(&layout, &schema).is_err());

		let map = HashMap::from([(ItemId::from("billing"), false)]);
		assert!(validate_sidebar_keys(&map, &schema).is_ok());
		let map = HashMap::from([(ItemId::from("payroll"), false)]);
		let Err(Error::ValidationError(msg)) = validate_sidebar_keys(&map, &schema) else {
			panic!("expected validation error");
		};
		assert!(msg.contains("payroll"));
	}
}

// vim: ts=4
