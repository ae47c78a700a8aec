//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Default location of the configuration file, without extension
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to load configuration: {0}")]
	Load(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Invalid(#[from] crate::ConfigValidationError),
}

/// Load settings from `CONFIG_PATH` (or `config/config`) and `SOLAR__*` env vars.
///
/// The file is optional; missing sections fall back to defaults.
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
	load_config_from(&path)
}

/// Load settings from an explicit file path plus environment overrides
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix("SOLAR")
				.prefix_separator("__")
				.separator("__"),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
