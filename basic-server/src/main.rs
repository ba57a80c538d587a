use std::sync::Arc;
use std::{env, path};

use dashcfg::AppBuilder;
use dashcfg_config_adapter_sqlite::ConfigAdapterSqlite;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
		}
	}
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> std::process::ExitCode {
	let config = Config::from_env();
	let mut builder = AppBuilder::new();

	let config_adapter = match ConfigAdapterSqlite::new(&config.db_dir).await {
		Ok(adapter) => Arc::new(adapter),
		Err(err) => {
			tracing::error!("FATAL: cannot open config database: {}", err);
			return std::process::ExitCode::FAILURE;
		}
	};

	builder.listen(config.listen).config_adapter(config_adapter);
	if let Err(err) = builder.run().await {
		tracing::error!("FATAL: {}", err);
		return std::process::ExitCode::FAILURE;
	}
	std::process::ExitCode::SUCCESS
}

// vim: ts=4
