//! Show/hide widget toggling on a base layout

use std::collections::HashMap;

use crate::prelude::*;
use crate::schema::WidgetKind;
use dashcfg_types::layout::{Layout, WidgetPlacement};

/// Default tile size for a newly shown widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
	pub w: u32,
	pub h: u32,
	pub min_w: u32,
	pub min_h: u32,
}

impl TileSize {
	pub const fn new(w: u32, h: u32, min_w: u32, min_h: u32) -> Self {
		Self { w, h, min_w, min_h }
	}
}

/// Tile used for widgets without a declared kind
pub const MIN_TILE: TileSize = TileSize::new(2, 2, 2, 2);

/// Per-kind default tile sizes plus the widget -> kind lookup
#[derive(Debug, Clone)]
pub struct CategoryDefaults {
	kinds: HashMap<WidgetId, WidgetKind>,
	sizes: HashMap<WidgetKind, TileSize>,
	fallback: TileSize,
}

impl CategoryDefaults {
	pub fn new(kinds: impl IntoIterator<Item = (WidgetId, WidgetKind)>) -> Self {
		Self {
			kinds: kinds.into_iter().collect(),
			sizes: HashMap::from([
				(WidgetKind::Stat, TileSize::new(4, 2, 2, 2)),
				(WidgetKind::Chart, TileSize::new(6, 4, 4, 3)),
				(WidgetKind::List, TileSize::new(6, 4, 3, 3)),
			]),
			fallback: MIN_TILE,
		}
	}

	pub fn with_size(mut self, kind: WidgetKind, size: TileSize) -> Self {
		self.sizes.insert(kind, size);
		self
	}

	pub fn kind_of(&self, widget_id: &str) -> Option<WidgetKind> {
		self.kinds.get(widget_id).copied()
	}

	pub fn size_for(&self, widget_id: &str) -> TileSize {
		self.kind_of(widget_id)
			.and_then(|kind| self.sizes.get(&kind).copied())
			.unwrap_or(self.fallback)
	}
}

/// Removes `widget_id` if present, otherwise appends it below everything else.
///
/// Untouched placements keep their relative order. A widget shown again after
/// being hidden lands at the bottom, not at its previous position.
pub fn toggle(layout: &[WidgetPlacement], widget_id: &WidgetId, defaults: &CategoryDefaults) -> Layout {
	if layout.iter().any(|p| &p.widget_id == widget_id) {
		return layout.iter().filter(|p| &p.widget_id != widget_id).cloned().collect();
	}

	let max_y = layout.iter().map(WidgetPlacement::bottom).max().unwrap_or(0);
	let size = defaults.size_for(widget_id.as_str());

	let mut res = Vec::with_capacity(layout.len() + 1);
	res.extend_from_slice(layout);
	res.push(WidgetPlacement {
		widget_id: widget_id.clone(),
		x: 0,
		y: max_y,
		w: size.w,
		h: size.h,
		min_w: Some(size.min_w),
		min_h: Some(size.min_h),
	});
	res
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	fn defaults() -> CategoryDefaults {
		CategoryDefaults::new([
			(WidgetId::from("stat_leads"), WidgetKind::Stat),
			(WidgetId::from("lead_trend"), WidgetKind::Chart),
		])
	}

	fn ids(layout: &[WidgetPlacement]) -> Vec<&str> {
		layout.iter().map(|p| p.widget_id.as_str()).collect()
	}

	#[test]
	fn test_toggle_off_removes_and_keeps_order() {
		let layout = vec![
			WidgetPlacement::new("a", 0, 0, 2, 2),
			WidgetPlacement::new("stat_leads", 2, 0, 4, 2),
			WidgetPlacement::new("b", 6, 0, 2, 2),
		];
		let res = toggle(&layout, &"stat_leads".into(), &defaults());
		assert_eq!(ids(&res), vec!["a", "b"]);
		assert_eq!(res[1], layout[2]);
	}

	#[test]
	fn test_toggle_on_empty_layout() {
		let res = toggle(&[], &"lead_trend".into(), &defaults());
		assert_eq!(res, vec![WidgetPlacement::new("lead_trend", 0, 0, 6, 4).with_min(4, 3)]);
	}

	#[test]
	fn test_toggle_on_appends_below_lowest() {
		let layout = vec![
			WidgetPlacement::new("a", 0, 0, 4, 6),
			WidgetPlacement::new("b", 4, 2, 4, 2),
		];
		let res = toggle(&layout, &"stat_leads".into(), &defaults());
		assert_eq!(res.len(), 3);
		assert_eq!(res[2], WidgetPlacement::new("stat_leads", 0, 6, 4, 2).with_min(2, 2));
	}

	#[test]
	fn test_toggle_on_unknown_kind_uses_min_tile() {
		let res = toggle(&[], &"announcements".into(), &defaults());
		assert_eq!((res[0].w, res[0].h), (MIN_TILE.w, MIN_TILE.h));
	}

	#[test]
	fn test_toggle_twice_restores_membership() {
		let layout = vec![
			WidgetPlacement::new("stat_leads", 0, 0, 4, 2),
			WidgetPlacement::new("lead_trend", 4, 0, 8, 4),
		];
		let once = toggle(&layout, &"stat_leads".into(), &defaults());
		let twice = toggle(&once, &"stat_leads".into(), &defaults());

		let before: HashSet<&str> = ids(&layout).into_iter().collect();
		let after: HashSet<&str> = ids(&twice).into_iter().collect();
		assert_eq!(before, after);
		// position is not preserved, only membership
		let readded = twice.iter().find(|p| p.widget_id.as_str() == "stat_leads").unwrap();
		assert_eq!(readded.y, 4);
	}

	#[test]
	fn test_toggle_on_below_huge_placement_saturates() {
		let layout = vec![WidgetPlacement::new("a", 0, u32::MAX, 2, 2)];
		let res = toggle(&layout, &"stat_leads".into(), &defaults());
		assert_eq!(res[1].y, u32::MAX);
	}

	#[test]
	fn test_custom_size() {
		let defaults = defaults().with_size(WidgetKind::Stat, TileSize::new(3, 3, 1, 1));
		let res = toggle(&[], &"stat_leads".into(), &defaults);
		assert_eq!((res[0].w, res[0].h), (3, 3));
	}
}

// vim: ts=4
