//! Schema types and definitions
//!
//! The schema is the code-defined catalog of configurable items. It is built in
//! a mutable `SchemaRegistry` during startup and then frozen.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::prelude::*;
use crate::toggle::CategoryDefaults;
use dashcfg_types::layout::Layout;

/// What kind of item a schema entry configures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
	Sidebar,
	Widget,
	PermissionAction,
}

/// Widget family, used for default tile sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
	Stat,
	Chart,
	List,
}

/// One catalog entry; immutable once registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
	/// Item id; permission actions use "resource.action"
	pub id: Box<str>,
	pub category: ItemCategory,
	pub label: Box<str>,
	pub default_enabled: bool,
	/// Only meaningful for widgets; `None` means "no declared kind"
	#[serde(skip_serializing_if = "Option::is_none")]
	pub widget_kind: Option<WidgetKind>,
}

impl ItemDefinition {
	pub fn sidebar(id: impl Into<Box<str>>) -> ItemDefinitionBuilder {
		ItemDefinitionBuilder::new(id, ItemCategory::Sidebar)
	}

	pub fn widget(id: impl Into<Box<str>>) -> ItemDefinitionBuilder {
		ItemDefinitionBuilder::new(id, ItemCategory::Widget)
	}

	pub fn permission(resource: &str, action: &str) -> ItemDefinitionBuilder {
		ItemDefinitionBuilder::new(format!("{}.{}", resource, action), ItemCategory::PermissionAction)
	}

	/// Splits a permission id into `(resource, action)`
	pub fn permission_key(&self) -> Option<(&str, &str)> {
		match self.category {
			ItemCategory::PermissionAction => self.id.split_once('.'),
			_ => None,
		}
	}
}

/// Builder for ItemDefinition with fluent API
pub struct ItemDefinitionBuilder {
	id: Box<str>,
	category: ItemCategory,
	label: Option<Box<str>>,
	default_enabled: bool,
	widget_kind: Option<WidgetKind>,
}

impl ItemDefinitionBuilder {
	pub fn new(id: impl Into<Box<str>>, category: ItemCategory) -> Self {
		Self {
			id: id.into(),
			category,
			label: None,
			default_enabled: true,
			widget_kind: None,
		}
	}

	/// Set the human-readable label (required)
	pub fn label(mut self, label: impl Into<Box<str>>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Baseline flag used when neither a user nor a role says otherwise
	pub fn default_enabled(mut self, enabled: bool) -> Self {
		self.default_enabled = enabled;
		self
	}

	pub fn kind(mut self, kind: WidgetKind) -> Self {
		self.widget_kind = Some(kind);
		self
	}

	pub fn build(self) -> ClResult<ItemDefinition> {
		if self.id.is_empty() {
			return Err(Error::ConfigError("Item id cannot be empty".into()));
		}
		let label = self
			.label
			.ok_or_else(|| Error::ConfigError(format!("Item '{}' has no label", self.id)))?;

		match self.category {
			ItemCategory::PermissionAction => {
				let valid = self
					.id
					.split_once('.')
					.is_some_and(|(res, act)| !res.is_empty() && !act.is_empty() && !act.contains('.'));
				if !valid {
					return Err(Error::ConfigError(format!(
						"Permission id '{}' must have the form 'resource.action'",
						self.id
					)));
				}
			}
			ItemCategory::Sidebar => {}
			ItemCategory::Widget => {}
		}
		if self.widget_kind.is_some() && self.category != ItemCategory::Widget {
			return Err(Error::ConfigError(format!(
				"Item '{}' is not a widget but declares a widget kind",
				self.id
			)));
		}

		Ok(ItemDefinition {
			id: self.id,
			category: self.category,
			label,
			default_enabled: self.default_enabled,
			widget_kind: self.widget_kind,
		})
	}
}

/// Mutable registry used during app initialization
pub struct SchemaRegistry {
	items: Vec<ItemDefinition>,
	keys: HashSet<(ItemCategory, Box<str>)>,
	default_layout: Option<Layout>,
}

impl SchemaRegistry {
	pub fn new() -> Self {
		Self { items: Vec::new(), keys: HashSet::new(), default_layout: None }
	}

	/// Register a new item definition
	pub fn register(&mut self, def: ItemDefinition) -> ClResult<()> {
		if !self.keys.insert((def.category, def.id.clone())) {
			return Err(Error::ConfigError(format!("Item '{}' is already registered", def.id)));
		}

		debug!("Registering {:?} item: {}", def.category, def.id);
		self.items.push(def);
		Ok(())
	}

	/// Set the starter layout used when neither user nor role has one
	pub fn set_default_layout(&mut self, layout: Layout) {
		self.default_layout = Some(layout);
	}

	/// Freeze the registry (make it immutable)
	///
	/// The default layout must hold exactly one placement per default-enabled
	/// widget and nothing else.
	pub fn freeze(self) -> ClResult<FrozenSchema> {
		let mut sidebar = HashMap::new();
		let mut widgets = HashMap::new();
		let mut permissions: HashMap<Box<str>, HashMap<Box<str>, usize>> = HashMap::new();

		for (idx, def) in self.items.iter().enumerate() {
			match def.category {
				ItemCategory::Sidebar => {
					sidebar.insert(def.id.clone(), idx);
				}
				ItemCategory::Widget => {
					widgets.insert(def.id.clone(), idx);
				}
				ItemCategory::PermissionAction => {
					if let Some((res, act)) = def.permission_key() {
						permissions.entry(res.into()).or_default().insert(act.into(), idx);
					}
				}
			}
		}

		let default_layout = self.default_layout.unwrap_or_default();
		let mut seen = HashSet::new();
		for placement in &default_layout {
			let Some(&idx) = widgets.get(placement.widget_id.as_str()) else {
				return Err(Error::ConfigError(format!(
					"Default layout references unknown widget '{}'",
					placement.widget_id
				)));
			};
			if !self.items[idx].default_enabled {
				return Err(Error::ConfigError(format!(
					"Default layout contains disabled widget '{}'",
					placement.widget_id
				)));
			}
			if !seen.insert(placement.widget_id.as_str()) {
				return Err(Error::ConfigError(format!(
					"Default layout places widget '{}' twice",
					placement.widget_id
				)));
			}
		}
		for def in self.items.iter().filter(|d| d.category == ItemCategory::Widget) {
			if def.default_enabled && !seen.contains(def.id.as_ref()) {
				return Err(Error::ConfigError(format!(
					"Default-enabled widget '{}' is missing from the default layout",
					def.id
				)));
			}
		}

		let category_defaults = CategoryDefaults::new(self.items.iter().filter_map(|def| {
			def.widget_kind.map(|kind| (WidgetId::new(def.id.clone()), kind))
		}));

		info!(
			"Freezing schema: {} sidebar items, {} widgets, {} permission resources",
			sidebar.len(),
			widgets.len(),
			permissions.len()
		);
		Ok(FrozenSchema {
			items: self.items,
			sidebar,
			widgets,
			permissions,
			default_layout,
			category_defaults,
		})
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl Default for SchemaRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Action entry of the permission schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionEntry {
	pub label: Box<str>,
	pub default_enabled: bool,
}

/// resource -> action -> entry, ordered for stable output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionSchema {
	pub resources: BTreeMap<ResourceId, BTreeMap<ActionId, PermissionEntry>>,
}

/// Sidebar and widget catalog as shown to clients
#[derive(Debug, Clone, Serialize)]
pub struct SchemaView<'a> {
	pub sidebar: Vec<&'a ItemDefinition>,
	pub widgets: Vec<&'a ItemDefinition>,
}

/// Immutable schema stored in the app state
pub struct FrozenSchema {
	items: Vec<ItemDefinition>,
	sidebar: HashMap<Box<str>, usize>,
	widgets: HashMap<Box<str>, usize>,
	permissions: HashMap<Box<str>, HashMap<Box<str>, usize>>,
	default_layout: Layout,
	category_defaults: CategoryDefaults,
}

impl FrozenSchema {
	pub fn sidebar_item(&self, id: &str) -> Option<&ItemDefinition> {
		self.sidebar.get(id).map(|&idx| &self.items[idx])
	}

	pub fn widget(&self, id: &str) -> Option<&ItemDefinition> {
		self.widgets.get(id).map(|&idx| &self.items[idx])
	}

	pub fn permission(&self, resource: &str, action: &str) -> Option<&ItemDefinition> {
		self.permissions
			.get(resource)
			.and_then(|actions| actions.get(action))
			.map(|&idx| &self.items[idx])
	}

	pub fn has_resource(&self, resource: &str) -> bool {
		self.permissions.contains_key(resource)
	}

	/// Sidebar items in registration order
	pub fn sidebar_items(&self) -> impl Iterator<Item = &ItemDefinition> {
		self.items.iter().filter(|def| def.category == ItemCategory::Sidebar)
	}

	/// Widgets in registration order
	pub fn widgets(&self) -> impl Iterator<Item = &ItemDefinition> {
		self.items.iter().filter(|def| def.category == ItemCategory::Widget)
	}

	pub fn permission_items(&self) -> impl Iterator<Item = &ItemDefinition> {
		self.items.iter().filter(|def| def.category == ItemCategory::PermissionAction)
	}

	pub fn permission_schema(&self) -> PermissionSchema {
		let mut resources: BTreeMap<ResourceId, BTreeMap<ActionId, PermissionEntry>> =
			BTreeMap::new();
		for def in self.permission_items() {
			if let Some((res, act)) = def.permission_key() {
				resources.entry(res.into()).or_default().insert(
					act.into(),
					PermissionEntry { label: def.label.clone(), default_enabled: def.default_enabled },
				);
			}
		}
		PermissionSchema { resources }
	}

	pub fn view(&self) -> SchemaView<'_> {
		SchemaView { sidebar: self.sidebar_items().collect(), widgets: self.widgets().collect() }
	}

	/// Fixed system default layout (reference breakpoint)
	pub fn default_layout(&self) -> &Layout {
		&self.default_layout
	}

	pub fn category_defaults(&self) -> &CategoryDefaults {
		&self.category_defaults
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}


// vim: ts=4
