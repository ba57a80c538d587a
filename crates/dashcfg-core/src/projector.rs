//! Projects the reference (`lg`) layout onto every breakpoint
//!
//! Three placement rules, applied per breakpoint:
//! - stat widgets (`stat_` prefix) flow into a grid of equal tiles
//! - named large widgets come from a fixed per-breakpoint table
//! - anything else is clamped to the column count and pinned to `x = 0`
//!
//! Every breakpoint depends only on the base layout, so only `lg` is persisted.

use crate::prelude::*;
use crate::validate::check_columns;
use dashcfg_types::layout::{Breakpoint, Layout, ResponsiveLayouts, WidgetPlacement};

pub const STAT_PREFIX: &str = "stat_";

const STAT_HEIGHT: u32 = 2;

/// (x, y, w, h) per breakpoint, in `Breakpoint::ALL` order
type Slots = [(u32, u32, u32, u32); 5];

// Stacking order below the stat rows: trend, funnel, usage, status, cost.
const NAMED_WIDGETS: [(&str, Slots); 5] = [
	("lead_trend", [(0, 4, 8, 4), (0, 4, 10, 4), (0, 8, 6, 4), (0, 8, 4, 4), (0, 8, 2, 4)]),
	("conversion_funnel", [(8, 4, 4, 4), (0, 8, 5, 4), (0, 12, 6, 4), (0, 12, 4, 4), (0, 12, 2, 4)]),
	("message_usage", [(0, 8, 6, 4), (5, 8, 5, 4), (0, 16, 6, 4), (0, 16, 4, 4), (0, 16, 2, 4)]),
	("campaign_status", [(6, 8, 6, 4), (0, 12, 5, 4), (0, 20, 6, 4), (0, 20, 4, 4), (0, 20, 2, 4)]),
	("campaign_cost", [(0, 12, 12, 4), (5, 12, 5, 4), (0, 24, 6, 4), (0, 24, 4, 4), (0, 24, 2, 4)]),
];

pub fn is_stat_widget(widget_id: &str) -> bool {
	widget_id.starts_with(STAT_PREFIX)
}

/// Number of stat tiles per row
pub fn stats_per_row(breakpoint: Breakpoint) -> u32 {
	match breakpoint {
		Breakpoint::Lg => 3,
		Breakpoint::Md => 2,
		Breakpoint::Sm | Breakpoint::Xs | Breakpoint::Xxs => 1,
	}
}

fn bp_index(breakpoint: Breakpoint) -> usize {
	match breakpoint {
		Breakpoint::Lg => 0,
		Breakpoint::Md => 1,
		Breakpoint::Sm => 2,
		Breakpoint::Xs => 3,
		Breakpoint::Xxs => 4,
	}
}

/// Fixed slot of a named large widget, if `widget_id` is one
pub fn named_slot(widget_id: &str, breakpoint: Breakpoint) -> Option<(u32, u32, u32, u32)> {
	NAMED_WIDGETS
		.iter()
		.find(|(id, _)| *id == widget_id)
		.map(|(_, slots)| slots[bp_index(breakpoint)])
}

fn clamp_min(min: Option<u32>, limit: u32) -> Option<u32> {
	min.map(|m| m.min(limit))
}

/// Projects the base layout onto a single breakpoint
pub fn project_breakpoint(base: &[WidgetPlacement], breakpoint: Breakpoint) -> Layout {
	let cols = breakpoint.columns();
	let per_row = stats_per_row(breakpoint).max(1);
	let mut stat_idx = 0u32;

	base.iter()
		.map(|p| {
			if is_stat_widget(p.widget_id.as_str()) {
				let k = stat_idx;
				stat_idx += 1;
				let w = cols / per_row;
				WidgetPlacement {
					widget_id: p.widget_id.clone(),
					x: (k % per_row) * w,
					y: (k / per_row) * STAT_HEIGHT,
					w,
					h: STAT_HEIGHT,
					min_w: clamp_min(p.min_w, w),
					min_h: clamp_min(p.min_h, STAT_HEIGHT),
				}
			} else if let Some((x, y, w, h)) = named_slot(p.widget_id.as_str(), breakpoint) {
				WidgetPlacement {
					widget_id: p.widget_id.clone(),
					x,
					y,
					w,
					h,
					min_w: clamp_min(p.min_w, w),
					min_h: clamp_min(p.min_h, h),
				}
			} else {
				WidgetPlacement {
					widget_id: p.widget_id.clone(),
					x: 0,
					y: p.y,
					w: p.w.min(cols),
					h: p.h,
					min_w: clamp_min(p.min_w, cols),
					min_h: p.min_h,
				}
			}
		})
		.collect()
}

/// Projects the base layout onto all five breakpoints
pub fn project(base: &[WidgetPlacement]) -> ResponsiveLayouts {
	let mut res = ResponsiveLayouts::default();
	for bp in Breakpoint::ALL {
		*res.get_mut(bp) = project_breakpoint(base, bp);
	}
	res
}

/// Verifies `x + w <= columns` on every breakpoint
pub fn check_bounds(layouts: &ResponsiveLayouts) -> ClResult<()> {
	for (bp, layout) in layouts.iter() {
		check_columns(layout, bp.columns()).map_err(|e| {
			warn!("Projection out of bounds at {}: {}", bp, e);
			e
		})?;
	}
	Ok(())
}


// vim: ts=4
