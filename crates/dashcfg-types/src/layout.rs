//! Grid layout types
//!
//! Widget placements are expressed in grid cells. The reference layout is the
//! `lg` breakpoint; the other breakpoints are projected from it.

use serde::{Deserialize, Serialize};

use crate::types::WidgetId;

/// Position and size of one widget on the dashboard grid
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetPlacement {
	pub widget_id: WidgetId,
	pub x: u32,
	pub y: u32,
	pub w: u32,
	pub h: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_w: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_h: Option<u32>,
}

impl WidgetPlacement {
	pub fn new(widget_id: impl Into<WidgetId>, x: u32, y: u32, w: u32, h: u32) -> Self {
		Self { widget_id: widget_id.into(), x, y, w, h, min_w: None, min_h: None }
	}

	pub fn with_min(mut self, min_w: u32, min_h: u32) -> Self {
		self.min_w = Some(min_w);
		self.min_h = Some(min_h);
		self
	}

	/// First grid row below this placement, saturating at `u32::MAX`
	pub fn bottom(&self) -> u32 {
		self.y.saturating_add(self.h)
	}

	/// First grid column right of this placement, saturating at `u32::MAX`
	pub fn right(&self) -> u32 {
		self.x.saturating_add(self.w)
	}

	/// Whether `x + w` and `y + h` are representable
	pub fn fits_u32(&self) -> bool {
		self.x.checked_add(self.w).is_some() && self.y.checked_add(self.h).is_some()
	}
}

/// Ordered list of placements, unique by widget id
pub type Layout = Vec<WidgetPlacement>;

/// Device-width class with a fixed grid column count
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
	Lg,
	Md,
	Sm,
	Xs,
	Xxs,
}

impl Breakpoint {
	pub const ALL: [Breakpoint; 5] =
		[Breakpoint::Lg, Breakpoint::Md, Breakpoint::Sm, Breakpoint::Xs, Breakpoint::Xxs];

	/// Reference breakpoint the base layout is expressed in
	pub const REFERENCE: Breakpoint = Breakpoint::Lg;

	pub fn columns(self) -> u32 {
		match self {
			Breakpoint::Lg => 12,
			Breakpoint::Md => 10,
			Breakpoint::Sm => 6,
			Breakpoint::Xs => 4,
			Breakpoint::Xxs => 2,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Breakpoint::Lg => "lg",
			Breakpoint::Md => "md",
			Breakpoint::Sm => "sm",
			Breakpoint::Xs => "xs",
			Breakpoint::Xxs => "xxs",
		}
	}
}

impl std::fmt::Display for Breakpoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// One layout per breakpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveLayouts {
	pub lg: Layout,
	pub md: Layout,
	pub sm: Layout,
	pub xs: Layout,
	pub xxs: Layout,
}

impl ResponsiveLayouts {
	pub fn get(&self, breakpoint: Breakpoint) -> &Layout {
		match breakpoint {
			Breakpoint::Lg => &self.lg,
			Breakpoint::Md => &self.md,
			Breakpoint::Sm => &self.sm,
			Breakpoint::Xs => &self.xs,
			Breakpoint::Xxs => &self.xxs,
		}
	}

	pub fn get_mut(&mut self, breakpoint: Breakpoint) -> &mut Layout {
		match breakpoint {
			Breakpoint::Lg => &mut self.lg,
			Breakpoint::Md => &mut self.md,
			Breakpoint::Sm => &mut self.sm,
			Breakpoint::Xs => &mut self.xs,
			Breakpoint::Xxs => &mut self.xxs,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &Layout)> {
		Breakpoint::ALL.into_iter().map(move |bp| (bp, self.get(bp)))
	}
}


// vim: ts=4
