//! App builder - constructs and runs the dashcfg service

use std::sync::Arc;

use crate::prelude::*;
use crate::routes;
use dashcfg_core::schema::{FrozenSchema, SchemaRegistry};
use dashcfg_core::ConfigService;
use dashcfg_types::config_adapter::ConfigAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hook adding extra items to the schema before it is frozen
type SchemaHook = Box<dyn FnOnce(&mut SchemaRegistry) -> ClResult<()> + Send>;

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	pub cache_size: usize,
}

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub schema: Arc<FrozenSchema>,
	pub config: Arc<ConfigService>,
}

pub type App = Arc<AppState>;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	config_adapter: Option<Arc<dyn ConfigAdapter>>,
	schema_hooks: Vec<SchemaHook>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A second builder in the same process keeps the first subscriber
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts { listen: "127.0.0.1:8080".into(), cache_size: 1000 },
			config_adapter: None,
			schema_hooks: Vec::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn cache_size(&mut self, cache_size: usize) -> &mut Self {
		self.opts.cache_size = cache_size;
		self
	}

	// Adapters
	pub fn config_adapter(&mut self, config_adapter: Arc<dyn ConfigAdapter>) -> &mut Self {
		self.config_adapter = Some(config_adapter);
		self
	}

	/// Registers additional schema items on top of the built-in catalog
	pub fn register_schema<F>(&mut self, f: F) -> &mut Self
	where
		F: FnOnce(&mut SchemaRegistry) -> ClResult<()> + Send + 'static,
	{
		self.schema_hooks.push(Box::new(f));
		self
	}

	/// Freezes the schema and assembles the shared state
	pub fn build(self) -> ClResult<App> {
		let Some(config_adapter) = self.config_adapter else {
			error!("FATAL: No config adapter configured");
			return Err(Error::Internal("No config adapter configured".to_string()));
		};

		let mut registry = SchemaRegistry::new();
		dashcfg_core::register_schema(&mut registry)?;
		for hook in self.schema_hooks {
			hook(&mut registry)?;
		}
		info!("Registered {} schema items", registry.len());
		let schema = Arc::new(registry.freeze()?);

		let config = Arc::new(ConfigService::new(
			schema.clone(),
			config_adapter,
			self.opts.cache_size,
		));
		info!("Config service initialized (cache size: {})", self.opts.cache_size);

		Ok(Arc::new(AppState { opts: self.opts, schema, config }))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("dashcfg V{}", VERSION);

		let app = self.build()?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on HTTP {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
