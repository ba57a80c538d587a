//! Built-in catalog: sidebar entries, dashboard widgets and permission actions

use crate::prelude::*;
use dashcfg_types::layout::{Layout, WidgetPlacement};

use super::types::{ItemDefinition, SchemaRegistry, WidgetKind};

const SIDEBAR: &[(&str, &str, bool)] = &[
	("dashboard", "Dashboard", true),
	("leads", "Leads", true),
	("campaigns", "Campaigns", true),
	("messages", "Messages", true),
	("analytics", "Analytics", false),
	("billing", "Billing", true),
	("team", "Team", true),
	("settings", "Settings", true),
];

const WIDGETS: &[(&str, &str, Option<WidgetKind>, bool)] = &[
	("stat_leads", "Total leads", Some(WidgetKind::Stat), true),
	("stat_applicants", "Applicants", Some(WidgetKind::Stat), true),
	("stat_conversion", "Conversion rate", Some(WidgetKind::Stat), true),
	("stat_campaigns", "Active campaigns", Some(WidgetKind::Stat), true),
	("lead_trend", "Lead trend", Some(WidgetKind::Chart), true),
	("conversion_funnel", "Conversion funnel", Some(WidgetKind::Chart), true),
	("message_usage", "Message usage", Some(WidgetKind::Chart), true),
	("campaign_status", "Campaign status", Some(WidgetKind::Chart), true),
	("campaign_cost", "Campaign cost", Some(WidgetKind::Chart), false),
	("recent_activity", "Recent activity", Some(WidgetKind::List), false),
	("announcements", "Announcements", None, false),
];

const PERMISSIONS: &[(&str, &str, &str, bool)] = &[
	("leads", "view", "View leads", true),
	("leads", "create", "Create leads", true),
	("leads", "edit", "Edit leads", true),
	("leads", "delete", "Delete leads", false),
	("leads", "export", "Export leads", false),
	("campaigns", "view", "View campaigns", true),
	("campaigns", "create", "Create campaigns", false),
	("campaigns", "edit", "Edit campaigns", false),
	("campaigns", "launch", "Launch campaigns", false),
	("campaigns", "delete", "Delete campaigns", false),
	("messages", "view", "View message history", true),
	("messages", "send", "Send messages", true),
	("billing", "view", "View invoices", false),
	("billing", "manage", "Manage subscription", false),
	("team", "view", "View team members", true),
	("team", "invite", "Invite team members", false),
	("team", "remove", "Remove team members", false),
	("settings", "view", "View organization settings", true),
	("settings", "manage", "Change organization settings", false),
];

/// Starter placements, one per default-enabled widget
pub fn system_default_layout() -> Layout {
	vec![
		WidgetPlacement::new("stat_leads", 0, 0, 4, 2).with_min(2, 2),
		WidgetPlacement::new("stat_applicants", 4, 0, 4, 2).with_min(2, 2),
		WidgetPlacement::new("stat_conversion", 8, 0, 4, 2).with_min(2, 2),
		WidgetPlacement::new("stat_campaigns", 0, 2, 4, 2).with_min(2, 2),
		WidgetPlacement::new("lead_trend", 0, 4, 8, 4).with_min(4, 3),
		WidgetPlacement::new("conversion_funnel", 8, 4, 4, 4).with_min(4, 3),
		WidgetPlacement::new("message_usage", 0, 8, 6, 4).with_min(4, 3),
		WidgetPlacement::new("campaign_status", 6, 8, 6, 4).with_min(4, 3),
	]
}

/// Register the built-in catalog
pub fn register_schema(registry: &mut SchemaRegistry) -> ClResult<()> {
	for &(id, label, enabled) in SIDEBAR {
		registry.register(
			ItemDefinition::sidebar(id).label(label).default_enabled(enabled).build()?,
		)?;
	}

	for &(id, label, kind, enabled) in WIDGETS {
		let mut builder = ItemDefinition::widget(id).label(label).default_enabled(enabled);
		if let Some(kind) = kind {
			builder = builder.kind(kind);
		}
		registry.register(builder.build()?)?;
	}

	for &(resource, action, label, enabled) in PERMISSIONS {
		registry.register(
			ItemDefinition::permission(resource, action)
				.label(label)
				.default_enabled(enabled)
				.build()?,
		)?;
	}

	registry.set_default_layout(system_default_layout());
	Ok(())
}


// vim: ts=4
